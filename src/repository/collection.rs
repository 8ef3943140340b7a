use diesel::prelude::*;

use crate::domain::collection::{
    Collection as DomainCollection, CollectionListQuery, NewCollection as DomainNewCollection,
    UpdateCollection as DomainUpdateCollection,
};
use crate::models::collection::{
    Collection as DbCollection, NewCollection as DbNewCollection,
    UpdateCollection as DbUpdateCollection,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CollectionReader, CollectionWriter, DieselRepository};

impl CollectionReader for DieselRepository {
    fn get_collection_by_id(&self, id: i32) -> RepositoryResult<Option<DomainCollection>> {
        use crate::schema::collections;

        let mut conn = self.conn()?;
        let collection = collections::table
            .filter(collections::id.eq(id))
            .first::<DbCollection>(&mut conn)
            .optional()?;

        Ok(collection.map(Into::into))
    }

    fn list_collections(
        &self,
        query: CollectionListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainCollection>)> {
        use crate::schema::collections;

        let mut conn = self.conn()?;

        let mut count_query = collections::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(collections::title.like(pattern));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = collections::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items = items.filter(collections::title.like(pattern));
        }

        items = items.order(collections::title.asc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let db_collections = items.load::<DbCollection>(&mut conn)?;

        Ok((
            total,
            db_collections.into_iter().map(Into::into).collect(),
        ))
    }
}

impl CollectionWriter for DieselRepository {
    fn create_collection(
        &self,
        new_collection: &DomainNewCollection,
    ) -> RepositoryResult<DomainCollection> {
        use crate::schema::collections;

        let mut conn = self.conn()?;
        let insertable = DbNewCollection::from(new_collection);

        let created = diesel::insert_into(collections::table)
            .values(&insertable)
            .get_result::<DbCollection>(&mut conn)?;

        Ok(created.into())
    }

    fn update_collection(
        &self,
        collection_id: i32,
        updates: &DomainUpdateCollection,
    ) -> RepositoryResult<DomainCollection> {
        use crate::schema::collections;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateCollection::from(updates);

        let target = collections::table.filter(collections::id.eq(collection_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbCollection>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_collection(&self, collection_id: i32) -> RepositoryResult<()> {
        use crate::schema::collections;

        let mut conn = self.conn()?;
        let target = collections::table.filter(collections::id.eq(collection_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
