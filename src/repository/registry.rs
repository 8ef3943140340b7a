//! Runtime mirror of the persisted content-type registry.
//!
//! A tagged item stores a (kind key, primary key) pair instead of a
//! foreign key, because no single foreign key can target a set of
//! heterogeneous tables. Resolving the pair back into an object takes a
//! per-kind accessor; this module holds those accessors as trait
//! objects keyed by the same kind strings the `content_types` table is
//! seeded with.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::tagged_item::TaggedObject;
use crate::models::address::Address as DbAddress;
use crate::models::cart::CartItem as DbCartItem;
use crate::models::collection::Collection as DbCollection;
use crate::models::customer::Customer as DbCustomer;
use crate::models::order::OrderItem as DbOrderItem;
use crate::models::promotion::Promotion as DbPromotion;
use crate::repository::errors::RepositoryResult;

/// Typed accessor for one taggable entity kind.
pub trait EntityResolver: Send + Sync {
    /// Kind key under which the entity is registered, matching its
    /// `content_types` row.
    fn kind(&self) -> &'static str;

    /// Fetch the row with the given primary key, if it still exists.
    /// A missing row is `Ok(None)`, never an error: tagged items may
    /// outlive their targets.
    fn fetch_by_id(
        &self,
        conn: &mut SqliteConnection,
        object_id: i32,
    ) -> RepositoryResult<Option<TaggedObject>>;
}

/// Maps kind keys to their resolvers. Kinds are registered explicitly
/// at startup; tagging an object of an unregistered kind is rejected at
/// resolution time.
pub struct TypeRegistry {
    resolvers: HashMap<&'static str, Box<dyn EntityResolver>>,
}

impl TypeRegistry {
    /// An empty registry with no kinds registered.
    pub fn new() -> Self {
        Self {
            resolvers: HashMap::new(),
        }
    }

    /// A registry covering the nine core entity kinds seeded by the
    /// initial migration.
    pub fn with_default_kinds() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(CollectionResolver));
        registry.register(Box::new(ProductResolver));
        registry.register(Box::new(PromotionResolver));
        registry.register(Box::new(CustomerResolver));
        registry.register(Box::new(OrderResolver));
        registry.register(Box::new(OrderItemResolver));
        registry.register(Box::new(CartResolver));
        registry.register(Box::new(CartItemResolver));
        registry.register(Box::new(AddressResolver));
        registry
    }

    /// Register a resolver under its kind key, replacing any previous
    /// resolver for the same kind.
    pub fn register(&mut self, resolver: Box<dyn EntityResolver>) {
        self.resolvers.insert(resolver.kind(), resolver);
    }

    pub fn resolver(&self, kind: &str) -> Option<&dyn EntityResolver> {
        self.resolvers.get(kind).map(Box::as_ref)
    }

    pub fn is_registered(&self, kind: &str) -> bool {
        self.resolvers.contains_key(kind)
    }

    /// Registered kind keys, sorted for stable output.
    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<&'static str> = self.resolvers.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::with_default_kinds()
    }
}

pub struct CollectionResolver;

impl EntityResolver for CollectionResolver {
    fn kind(&self) -> &'static str {
        "collection"
    }

    fn fetch_by_id(
        &self,
        conn: &mut SqliteConnection,
        object_id: i32,
    ) -> RepositoryResult<Option<TaggedObject>> {
        use crate::schema::collections;

        let row = collections::table
            .filter(collections::id.eq(object_id))
            .first::<DbCollection>(conn)
            .optional()?;

        Ok(row.map(|collection| TaggedObject::Collection(collection.into())))
    }
}

pub struct ProductResolver;

impl EntityResolver for ProductResolver {
    fn kind(&self) -> &'static str {
        "product"
    }

    fn fetch_by_id(
        &self,
        conn: &mut SqliteConnection,
        object_id: i32,
    ) -> RepositoryResult<Option<TaggedObject>> {
        let product = super::product::fetch_product(conn, object_id)?;
        Ok(product.map(TaggedObject::Product))
    }
}

pub struct PromotionResolver;

impl EntityResolver for PromotionResolver {
    fn kind(&self) -> &'static str {
        "promotion"
    }

    fn fetch_by_id(
        &self,
        conn: &mut SqliteConnection,
        object_id: i32,
    ) -> RepositoryResult<Option<TaggedObject>> {
        use crate::schema::promotions;

        let row = promotions::table
            .filter(promotions::id.eq(object_id))
            .first::<DbPromotion>(conn)
            .optional()?;

        Ok(row.map(|promotion| TaggedObject::Promotion(promotion.into())))
    }
}

pub struct CustomerResolver;

impl EntityResolver for CustomerResolver {
    fn kind(&self) -> &'static str {
        "customer"
    }

    fn fetch_by_id(
        &self,
        conn: &mut SqliteConnection,
        object_id: i32,
    ) -> RepositoryResult<Option<TaggedObject>> {
        use crate::schema::customers;

        let row = customers::table
            .filter(customers::id.eq(object_id))
            .first::<DbCustomer>(conn)
            .optional()?;

        Ok(row.map(|customer| TaggedObject::Customer(customer.into())))
    }
}

pub struct OrderResolver;

impl EntityResolver for OrderResolver {
    fn kind(&self) -> &'static str {
        "order"
    }

    fn fetch_by_id(
        &self,
        conn: &mut SqliteConnection,
        object_id: i32,
    ) -> RepositoryResult<Option<TaggedObject>> {
        let order = super::order::fetch_order(conn, object_id)?;
        Ok(order.map(TaggedObject::Order))
    }
}

pub struct OrderItemResolver;

impl EntityResolver for OrderItemResolver {
    fn kind(&self) -> &'static str {
        "order_item"
    }

    fn fetch_by_id(
        &self,
        conn: &mut SqliteConnection,
        object_id: i32,
    ) -> RepositoryResult<Option<TaggedObject>> {
        use crate::schema::order_items;

        let row = order_items::table
            .filter(order_items::id.eq(object_id))
            .first::<DbOrderItem>(conn)
            .optional()?;

        Ok(row.map(|item| TaggedObject::OrderItem(item.into())))
    }
}

pub struct CartResolver;

impl EntityResolver for CartResolver {
    fn kind(&self) -> &'static str {
        "cart"
    }

    fn fetch_by_id(
        &self,
        conn: &mut SqliteConnection,
        object_id: i32,
    ) -> RepositoryResult<Option<TaggedObject>> {
        let cart = super::cart::fetch_cart(conn, object_id)?;
        Ok(cart.map(TaggedObject::Cart))
    }
}

pub struct CartItemResolver;

impl EntityResolver for CartItemResolver {
    fn kind(&self) -> &'static str {
        "cart_item"
    }

    fn fetch_by_id(
        &self,
        conn: &mut SqliteConnection,
        object_id: i32,
    ) -> RepositoryResult<Option<TaggedObject>> {
        use crate::schema::cart_items;

        let row = cart_items::table
            .filter(cart_items::id.eq(object_id))
            .first::<DbCartItem>(conn)
            .optional()?;

        Ok(row.map(|item| TaggedObject::CartItem(item.into())))
    }
}

pub struct AddressResolver;

impl EntityResolver for AddressResolver {
    fn kind(&self) -> &'static str {
        "address"
    }

    fn fetch_by_id(
        &self,
        conn: &mut SqliteConnection,
        object_id: i32,
    ) -> RepositoryResult<Option<TaggedObject>> {
        use crate::schema::addresses;

        let row = addresses::table
            .filter(addresses::id.eq(object_id))
            .first::<DbAddress>(conn)
            .optional()?;

        Ok(row.map(|address| TaggedObject::Address(address.into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_covers_core_kinds() {
        let registry = TypeRegistry::with_default_kinds();
        for kind in [
            "address",
            "cart",
            "cart_item",
            "collection",
            "customer",
            "order",
            "order_item",
            "product",
            "promotion",
        ] {
            assert!(registry.is_registered(kind), "missing kind {kind}");
        }
        assert!(!registry.is_registered("video"));
    }

    #[test]
    fn kinds_are_sorted() {
        let registry = TypeRegistry::with_default_kinds();
        let kinds = registry.kinds();
        let mut sorted = kinds.clone();
        sorted.sort_unstable();
        assert_eq!(kinds, sorted);
    }
}
