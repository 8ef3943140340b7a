use std::collections::HashMap;

use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use validator::Validate;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
    UpdateProduct as DomainUpdateProduct,
};
use crate::domain::promotion::Promotion as DomainPromotion;
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
};
use crate::models::promotion::{ProductPromotion as DbProductPromotion, Promotion as DbPromotion};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProductReader, ProductWriter};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProduct>> {
        let mut conn = self.conn()?;
        fetch_product(&mut conn, id)
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let mut count_query = products::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(
                products::title
                    .like(pattern.clone())
                    .or(products::description.like(pattern)),
            );
        }

        if let Some(collection_id) = query.collection_id {
            count_query = count_query.filter(products::collection_id.eq(collection_id));
        }

        if let Some(slug) = query.slug.as_ref() {
            count_query = count_query.filter(products::slug.eq(slug));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = products::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items = items.filter(
                products::title
                    .like(pattern.clone())
                    .or(products::description.like(pattern)),
            );
        }

        if let Some(collection_id) = query.collection_id {
            items = items.filter(products::collection_id.eq(collection_id));
        }

        if let Some(slug) = query.slug.as_ref() {
            items = items.filter(products::slug.eq(slug));
        }

        items = items.order(products::title.asc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;

        if db_products.is_empty() {
            return Ok((total, Vec::new()));
        }

        let product_ids: Vec<i32> = db_products.iter().map(|product| product.id).collect();
        let mut promotion_map = load_promotions_for_products(&mut conn, &product_ids)?;

        let mut domain_products = Vec::with_capacity(db_products.len());
        for db_product in db_products {
            let mut domain: DomainProduct = db_product.into();
            domain.promotions = promotion_map.remove(&domain.id).unwrap_or_default();
            domain_products.push(domain);
        }

        Ok((total, domain_products))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        new_product.validate()?;

        let mut conn = self.conn()?;
        let db_new = DbNewProduct::from(new_product);

        let created = diesel::insert_into(products::table)
            .values(&db_new)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        updates.validate()?;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        let target = products::table.filter(products::id.eq(product_id));

        // The row is read back rather than taken from RETURNING: the
        // last_update trigger fires after the statement reports its row.
        let updated = diesel::update(target).set(&db_updates).execute(&mut conn)?;
        if updated == 0 {
            return Err(RepositoryError::NotFound);
        }

        fetch_product(&mut conn, product_id)?.ok_or(RepositoryError::NotFound)
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let target = products::table.filter(products::id.eq(product_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn set_product_promotions(
        &self,
        product_id: i32,
        promotion_ids: &[i32],
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::{product_promotions, products};

        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let product_exists: bool =
                select(exists(products::table.filter(products::id.eq(product_id))))
                    .get_result(conn)?;
            if !product_exists {
                return Err(RepositoryError::NotFound);
            }

            diesel::delete(
                product_promotions::table.filter(product_promotions::product_id.eq(product_id)),
            )
            .execute(conn)?;

            if !promotion_ids.is_empty() {
                let links: Vec<DbProductPromotion> = promotion_ids
                    .iter()
                    .map(|&promotion_id| DbProductPromotion {
                        product_id,
                        promotion_id,
                    })
                    .collect();

                diesel::insert_into(product_promotions::table)
                    .values(&links)
                    .execute(conn)?;
            }

            fetch_product(conn, product_id)?.ok_or(RepositoryError::NotFound)
        })
    }
}

/// Load one product with its promotions attached. Shared with the
/// entity-kind registry resolver.
pub(crate) fn fetch_product(
    conn: &mut SqliteConnection,
    id: i32,
) -> RepositoryResult<Option<DomainProduct>> {
    use crate::schema::products;

    let product = products::table
        .filter(products::id.eq(id))
        .first::<DbProduct>(conn)
        .optional()?;

    if let Some(db_product) = product {
        let mut domain: DomainProduct = db_product.into();
        let mut promotions = load_promotions_for_products(conn, &[domain.id])?;
        domain.promotions = promotions.remove(&domain.id).unwrap_or_default();
        Ok(Some(domain))
    } else {
        Ok(None)
    }
}

fn load_promotions_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainPromotion>>> {
    use crate::schema::{product_promotions, promotions};

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_promotions::table
        .inner_join(promotions::table)
        .filter(product_promotions::product_id.eq_any(product_ids))
        .order(promotions::title.asc())
        .select((product_promotions::product_id, DbPromotion::as_select()))
        .load::<(i32, DbPromotion)>(conn)?;

    let mut map: HashMap<i32, Vec<DomainPromotion>> = HashMap::new();
    for (product_id, promotion) in rows {
        map.entry(product_id).or_default().push(promotion.into());
    }

    Ok(map)
}
