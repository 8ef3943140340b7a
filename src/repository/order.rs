use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use validator::Validate;

use crate::domain::order::{
    NewOrder as DomainNewOrder, Order as DomainOrder, OrderListQuery,
    UpdateOrder as DomainUpdateOrder,
};
use crate::models::order::{
    NewOrder as DbNewOrder, NewOrderItem as DbNewOrderItem, Order as DbOrder,
    OrderItem as DbOrderItem, UpdateOrder as DbUpdateOrder,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, OrderReader, OrderWriter};

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<DomainOrder>> {
        let mut conn = self.conn()?;
        fetch_order(&mut conn, id)
    }

    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<DomainOrder>)> {
        use crate::schema::{order_items, orders};

        let mut conn = self.conn()?;

        let status_filter = query.payment_status.map(|status| status.as_str());

        let mut count_query = orders::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(status) = status_filter {
            count_query = count_query.filter(orders::payment_status.eq(status));
        }

        if let Some(customer_id) = query.customer_id {
            count_query = count_query.filter(orders::customer_id.eq(customer_id));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = orders::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(status) = status_filter {
            items = items.filter(orders::payment_status.eq(status));
        }

        if let Some(customer_id) = query.customer_id {
            items = items.filter(orders::customer_id.eq(customer_id));
        }

        items = items.order(orders::placed_at.desc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let db_orders = items.load::<DbOrder>(&mut conn)?;
        if db_orders.is_empty() {
            return Ok((total, Vec::new()));
        }

        let order_ids: Vec<i32> = db_orders.iter().map(|order| order.id).collect();

        let rows = order_items::table
            .filter(order_items::order_id.eq_any(&order_ids))
            .order(order_items::id.asc())
            .load::<DbOrderItem>(&mut conn)?;

        let mut items_by_order: HashMap<i32, Vec<DbOrderItem>> = HashMap::new();
        for item in rows {
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        let orders = db_orders
            .into_iter()
            .map(|order| {
                let order_id = order.id;
                let items = items_by_order.remove(&order_id).unwrap_or_default();
                DomainOrder::from((order, items))
            })
            .collect();

        Ok((total, orders))
    }
}

impl OrderWriter for DieselRepository {
    fn create_order(&self, new_order: &DomainNewOrder) -> RepositoryResult<DomainOrder> {
        use crate::schema::{order_items, orders};

        new_order.validate()?;

        let mut conn = self.conn()?;

        conn.transaction::<DomainOrder, RepositoryError, _>(|conn| {
            let db_new = DbNewOrder::from(new_order);

            let created = diesel::insert_into(orders::table)
                .values(&db_new)
                .get_result::<DbOrder>(conn)?;

            let order_id = created.id;

            if !new_order.items.is_empty() {
                let payload: Vec<DbNewOrderItem> = new_order
                    .items
                    .iter()
                    .map(|item| DbNewOrderItem::from_domain(order_id, item))
                    .collect();

                diesel::insert_into(order_items::table)
                    .values(&payload)
                    .execute(conn)?;
            }

            let items = order_items::table
                .filter(order_items::order_id.eq(order_id))
                .order(order_items::id.asc())
                .load::<DbOrderItem>(conn)?;

            Ok(DomainOrder::from((created, items)))
        })
    }

    fn update_order(
        &self,
        order_id: i32,
        updates: &DomainUpdateOrder,
    ) -> RepositoryResult<DomainOrder> {
        use crate::schema::{order_items, orders};

        updates.validate()?;

        let mut conn = self.conn()?;

        conn.transaction::<DomainOrder, RepositoryError, _>(|conn| {
            if let Some(payment_status) = updates.payment_status {
                let db_updates = DbUpdateOrder {
                    payment_status: payment_status.as_str(),
                };

                let target = orders::table.filter(orders::id.eq(order_id));
                let updated = diesel::update(target).set(&db_updates).execute(conn)?;
                if updated == 0 {
                    return Err(RepositoryError::NotFound);
                }
            }

            if let Some(items) = updates.items.as_ref() {
                diesel::delete(order_items::table.filter(order_items::order_id.eq(order_id)))
                    .execute(conn)?;

                if !items.is_empty() {
                    let payload: Vec<DbNewOrderItem> = items
                        .iter()
                        .map(|item| DbNewOrderItem::from_domain(order_id, item))
                        .collect();

                    diesel::insert_into(order_items::table)
                        .values(&payload)
                        .execute(conn)?;
                }
            }

            fetch_order(conn, order_id)?.ok_or(RepositoryError::NotFound)
        })
    }

    fn delete_order(&self, order_id: i32) -> RepositoryResult<()> {
        use crate::schema::orders;

        let mut conn = self.conn()?;
        let target = orders::table.filter(orders::id.eq(order_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Load one order with its lines attached. Shared with the entity-kind
/// registry resolver.
pub(crate) fn fetch_order(
    conn: &mut SqliteConnection,
    id: i32,
) -> RepositoryResult<Option<DomainOrder>> {
    use crate::schema::{order_items, orders};

    let order = orders::table
        .filter(orders::id.eq(id))
        .first::<DbOrder>(conn)
        .optional()?;

    let Some(order) = order else {
        return Ok(None);
    };

    let order_id = order.id;

    let items = order_items::table
        .filter(order_items::order_id.eq(order_id))
        .order(order_items::id.asc())
        .load::<DbOrderItem>(conn)?;

    Ok(Some(DomainOrder::from((order, items))))
}
