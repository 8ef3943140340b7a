use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use validator::Validate;

use crate::domain::cart::{
    Cart as DomainCart, CartItem as DomainCartItem, NewCartItem as DomainNewCartItem,
    UpdateCartItem as DomainUpdateCartItem,
};
use crate::models::cart::{
    Cart as DbCart, CartItem as DbCartItem, NewCartItem as DbNewCartItem,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CartReader, CartWriter, DieselRepository};

impl CartReader for DieselRepository {
    fn get_cart_by_id(&self, id: i32) -> RepositoryResult<Option<DomainCart>> {
        let mut conn = self.conn()?;
        fetch_cart(&mut conn, id)
    }
}

impl CartWriter for DieselRepository {
    fn create_cart(&self) -> RepositoryResult<DomainCart> {
        use crate::schema::carts;

        let mut conn = self.conn()?;

        // The row is nothing but its store-stamped creation time.
        let created = diesel::insert_into(carts::table)
            .default_values()
            .get_result::<DbCart>(&mut conn)?;

        Ok(created.into_domain(Vec::new()))
    }

    fn delete_cart(&self, cart_id: i32) -> RepositoryResult<()> {
        use crate::schema::carts;

        let mut conn = self.conn()?;
        let target = carts::table.filter(carts::id.eq(cart_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn add_cart_item(&self, new_item: &DomainNewCartItem) -> RepositoryResult<DomainCartItem> {
        use crate::schema::cart_items;

        new_item.validate()?;

        let mut conn = self.conn()?;
        let insertable = DbNewCartItem::from(new_item);

        let created = diesel::insert_into(cart_items::table)
            .values(&insertable)
            .get_result::<DbCartItem>(&mut conn)?;

        Ok(created.into())
    }

    fn update_cart_item(
        &self,
        cart_item_id: i32,
        updates: &DomainUpdateCartItem,
    ) -> RepositoryResult<DomainCartItem> {
        use crate::schema::cart_items;

        updates.validate()?;

        let mut conn = self.conn()?;
        let target = cart_items::table.filter(cart_items::id.eq(cart_item_id));

        let updated = diesel::update(target)
            .set(cart_items::quantity.eq(updates.quantity))
            .get_result::<DbCartItem>(&mut conn)?;

        Ok(updated.into())
    }

    fn remove_cart_item(&self, cart_item_id: i32) -> RepositoryResult<()> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;
        let target = cart_items::table.filter(cart_items::id.eq(cart_item_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Load one cart with its lines attached. Shared with the entity-kind
/// registry resolver.
pub(crate) fn fetch_cart(
    conn: &mut SqliteConnection,
    id: i32,
) -> RepositoryResult<Option<DomainCart>> {
    use crate::schema::{cart_items, carts};

    let cart = carts::table
        .filter(carts::id.eq(id))
        .first::<DbCart>(conn)
        .optional()?;

    let Some(cart) = cart else {
        return Ok(None);
    };

    let items = cart_items::table
        .filter(cart_items::cart_id.eq(cart.id))
        .order(cart_items::id.asc())
        .load::<DbCartItem>(conn)?;

    Ok(Some(cart.into_domain(items)))
}
