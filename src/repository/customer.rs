use diesel::prelude::*;
use validator::Validate;

use crate::domain::customer::{
    Customer as DomainCustomer, CustomerListQuery, NewCustomer as DomainNewCustomer,
    UpdateCustomer as DomainUpdateCustomer,
};
use crate::models::customer::{
    Customer as DbCustomer, NewCustomer as DbNewCustomer, UpdateCustomer as DbUpdateCustomer,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CustomerReader, CustomerWriter, DieselRepository};

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(&self, id: i32) -> RepositoryResult<Option<DomainCustomer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let customer = customers::table
            .filter(customers::id.eq(id))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        Ok(customer.map(Into::into))
    }

    fn get_customer_by_email(&self, email: &str) -> RepositoryResult<Option<DomainCustomer>> {
        use crate::schema::customers;

        let normalized_email = email.to_lowercase();

        let mut conn = self.conn()?;
        let customer = customers::table
            .filter(customers::email.eq(normalized_email))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        Ok(customer.map(Into::into))
    }

    fn list_customers(
        &self,
        query: CustomerListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainCustomer>)> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        let membership_filter = query.membership.map(|membership| membership.as_str());

        let mut count_query = customers::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(
                customers::first_name
                    .like(pattern.clone())
                    .or(customers::last_name.like(pattern.clone()))
                    .or(customers::email.like(pattern)),
            );
        }

        if let Some(membership) = membership_filter {
            count_query = count_query.filter(customers::membership.eq(membership));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = customers::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items = items.filter(
                customers::first_name
                    .like(pattern.clone())
                    .or(customers::last_name.like(pattern.clone()))
                    .or(customers::email.like(pattern)),
            );
        }

        if let Some(membership) = membership_filter {
            items = items.filter(customers::membership.eq(membership));
        }

        items = items.order((customers::last_name.asc(), customers::first_name.asc()));

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let db_customers = items.load::<DbCustomer>(&mut conn)?;

        Ok((total, db_customers.into_iter().map(Into::into).collect()))
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(&self, new_customer: &DomainNewCustomer) -> RepositoryResult<DomainCustomer> {
        use crate::schema::customers;

        new_customer.validate()?;

        let mut conn = self.conn()?;
        let db_new = DbNewCustomer::from(new_customer);

        let created = diesel::insert_into(customers::table)
            .values(&db_new)
            .get_result::<DbCustomer>(&mut conn)?;

        Ok(created.into())
    }

    fn update_customer(
        &self,
        customer_id: i32,
        updates: &DomainUpdateCustomer,
    ) -> RepositoryResult<DomainCustomer> {
        use crate::schema::customers;

        updates.validate()?;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateCustomer::from(updates);

        let target = customers::table.filter(customers::id.eq(customer_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbCustomer>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_customer(&self, customer_id: i32) -> RepositoryResult<()> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let target = customers::table.filter(customers::id.eq(customer_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
