use diesel::prelude::*;

use crate::domain::address::{
    Address as DomainAddress, NewAddress as DomainNewAddress,
    UpdateAddress as DomainUpdateAddress,
};
use crate::models::address::{
    Address as DbAddress, NewAddress as DbNewAddress, UpdateAddress as DbUpdateAddress,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AddressReader, AddressWriter, DieselRepository};

impl AddressReader for DieselRepository {
    fn list_addresses(&self, customer_id: i32) -> RepositoryResult<Vec<DomainAddress>> {
        use crate::schema::addresses;

        let mut conn = self.conn()?;
        let db_addresses = addresses::table
            .filter(addresses::customer_id.eq(customer_id))
            .order(addresses::id.asc())
            .load::<DbAddress>(&mut conn)?;

        Ok(db_addresses.into_iter().map(Into::into).collect())
    }
}

impl AddressWriter for DieselRepository {
    fn create_address(&self, new_address: &DomainNewAddress) -> RepositoryResult<DomainAddress> {
        use crate::schema::addresses;

        let mut conn = self.conn()?;
        let insertable = DbNewAddress::from(new_address);

        let created = diesel::insert_into(addresses::table)
            .values(&insertable)
            .get_result::<DbAddress>(&mut conn)?;

        Ok(created.into())
    }

    fn update_address(
        &self,
        address_id: i32,
        updates: &DomainUpdateAddress,
    ) -> RepositoryResult<DomainAddress> {
        use crate::schema::addresses;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateAddress::from(updates);

        let target = addresses::table.filter(addresses::id.eq(address_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbAddress>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_address(&self, address_id: i32) -> RepositoryResult<()> {
        use crate::schema::addresses;

        let mut conn = self.conn()?;
        let target = addresses::table.filter(addresses::id.eq(address_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
