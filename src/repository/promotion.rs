use diesel::prelude::*;
use validator::Validate;

use crate::domain::promotion::{
    NewPromotion as DomainNewPromotion, Promotion as DomainPromotion, PromotionListQuery,
    UpdatePromotion as DomainUpdatePromotion,
};
use crate::models::promotion::{
    NewPromotion as DbNewPromotion, Promotion as DbPromotion,
    UpdatePromotion as DbUpdatePromotion,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, PromotionReader, PromotionWriter};

impl PromotionReader for DieselRepository {
    fn get_promotion_by_id(&self, id: i32) -> RepositoryResult<Option<DomainPromotion>> {
        use crate::schema::promotions;

        let mut conn = self.conn()?;
        let promotion = promotions::table
            .filter(promotions::id.eq(id))
            .first::<DbPromotion>(&mut conn)
            .optional()?;

        Ok(promotion.map(Into::into))
    }

    fn list_promotions(
        &self,
        query: PromotionListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainPromotion>)> {
        use crate::schema::promotions;

        let mut conn = self.conn()?;

        let mut count_query = promotions::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(promotions::title.like(pattern));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = promotions::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items = items.filter(promotions::title.like(pattern));
        }

        items = items.order(promotions::title.asc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let db_promotions = items.load::<DbPromotion>(&mut conn)?;

        Ok((total, db_promotions.into_iter().map(Into::into).collect()))
    }
}

impl PromotionWriter for DieselRepository {
    fn create_promotion(
        &self,
        new_promotion: &DomainNewPromotion,
    ) -> RepositoryResult<DomainPromotion> {
        use crate::schema::promotions;

        new_promotion.validate()?;

        let mut conn = self.conn()?;
        let insertable = DbNewPromotion::from(new_promotion);

        let created = diesel::insert_into(promotions::table)
            .values(&insertable)
            .get_result::<DbPromotion>(&mut conn)?;

        Ok(created.into())
    }

    fn update_promotion(
        &self,
        promotion_id: i32,
        updates: &DomainUpdatePromotion,
    ) -> RepositoryResult<DomainPromotion> {
        use crate::schema::promotions;

        updates.validate()?;

        let mut conn = self.conn()?;
        let db_updates = DbUpdatePromotion::from(updates);

        let target = promotions::table.filter(promotions::id.eq(promotion_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbPromotion>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_promotion(&self, promotion_id: i32) -> RepositoryResult<()> {
        use crate::schema::promotions;

        let mut conn = self.conn()?;
        let target = promotions::table.filter(promotions::id.eq(promotion_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
