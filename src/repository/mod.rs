use crate::db::{DbConnection, DbPool};
use crate::domain::address::{Address, NewAddress, UpdateAddress};
use crate::domain::cart::{Cart, CartItem, NewCartItem, UpdateCartItem};
use crate::domain::collection::{
    Collection, CollectionListQuery, NewCollection, UpdateCollection,
};
use crate::domain::customer::{Customer, CustomerListQuery, NewCustomer, UpdateCustomer};
use crate::domain::order::{NewOrder, Order, OrderListQuery, UpdateOrder};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};
use crate::domain::promotion::{NewPromotion, Promotion, PromotionListQuery, UpdatePromotion};
use crate::domain::tag::{NewTag, Tag, TagListQuery, UpdateTag};
use crate::domain::tagged_item::{NewTaggedItem, TaggedItem, TaggedItemListQuery, TaggedObject};
use crate::repository::errors::RepositoryResult;
use crate::repository::registry::TypeRegistry;

pub mod errors;
pub mod registry;

mod address;
mod cart;
mod collection;
mod customer;
mod order;
mod product;
mod promotion;
mod tag;
mod tagged_item;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over collection records.
pub trait CollectionReader {
    fn get_collection_by_id(&self, id: i32) -> RepositoryResult<Option<Collection>>;
    fn list_collections(
        &self,
        query: CollectionListQuery,
    ) -> RepositoryResult<(usize, Vec<Collection>)>;
}

/// Write operations over collection records.
pub trait CollectionWriter {
    fn create_collection(&self, new_collection: &NewCollection) -> RepositoryResult<Collection>;
    fn update_collection(
        &self,
        collection_id: i32,
        updates: &UpdateCollection,
    ) -> RepositoryResult<Collection>;
    fn delete_collection(&self, collection_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over product records.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

/// Write operations over product records.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, product_id: i32, updates: &UpdateProduct)
    -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    fn set_product_promotions(
        &self,
        product_id: i32,
        promotion_ids: &[i32],
    ) -> RepositoryResult<Product>;
}

/// Read-only operations over promotion records.
pub trait PromotionReader {
    fn get_promotion_by_id(&self, id: i32) -> RepositoryResult<Option<Promotion>>;
    fn list_promotions(
        &self,
        query: PromotionListQuery,
    ) -> RepositoryResult<(usize, Vec<Promotion>)>;
}

/// Write operations over promotion records.
pub trait PromotionWriter {
    fn create_promotion(&self, new_promotion: &NewPromotion) -> RepositoryResult<Promotion>;
    fn update_promotion(
        &self,
        promotion_id: i32,
        updates: &UpdatePromotion,
    ) -> RepositoryResult<Promotion>;
    fn delete_promotion(&self, promotion_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over customer records.
pub trait CustomerReader {
    fn get_customer_by_id(&self, id: i32) -> RepositoryResult<Option<Customer>>;
    fn get_customer_by_email(&self, email: &str) -> RepositoryResult<Option<Customer>>;
    fn list_customers(&self, query: CustomerListQuery)
    -> RepositoryResult<(usize, Vec<Customer>)>;
}

/// Write operations over customer records.
pub trait CustomerWriter {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    fn update_customer(
        &self,
        customer_id: i32,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer>;
    fn delete_customer(&self, customer_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over order records.
pub trait OrderReader {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
}

/// Write operations over order records.
pub trait OrderWriter {
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    fn update_order(&self, order_id: i32, updates: &UpdateOrder) -> RepositoryResult<Order>;
    fn delete_order(&self, order_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over cart records.
pub trait CartReader {
    fn get_cart_by_id(&self, id: i32) -> RepositoryResult<Option<Cart>>;
}

/// Write operations over cart records and their lines.
pub trait CartWriter {
    fn create_cart(&self) -> RepositoryResult<Cart>;
    fn delete_cart(&self, cart_id: i32) -> RepositoryResult<()>;
    fn add_cart_item(&self, new_item: &NewCartItem) -> RepositoryResult<CartItem>;
    fn update_cart_item(
        &self,
        cart_item_id: i32,
        updates: &UpdateCartItem,
    ) -> RepositoryResult<CartItem>;
    fn remove_cart_item(&self, cart_item_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over address records.
pub trait AddressReader {
    fn list_addresses(&self, customer_id: i32) -> RepositoryResult<Vec<Address>>;
}

/// Write operations over address records.
pub trait AddressWriter {
    fn create_address(&self, new_address: &NewAddress) -> RepositoryResult<Address>;
    fn update_address(&self, address_id: i32, updates: &UpdateAddress)
    -> RepositoryResult<Address>;
    fn delete_address(&self, address_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over tag records.
pub trait TagReader {
    fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<Tag>>;
    fn list_tags(&self, query: TagListQuery) -> RepositoryResult<(usize, Vec<Tag>)>;
}

/// Write operations over tag records.
pub trait TagWriter {
    fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag>;
    fn update_tag(&self, tag_id: i32, updates: &UpdateTag) -> RepositoryResult<Tag>;
    fn delete_tag(&self, tag_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over tagged items and the entity-kind registry.
pub trait TaggedItemReader {
    fn list_tagged_items(
        &self,
        query: TaggedItemListQuery,
    ) -> RepositoryResult<(usize, Vec<TaggedItem>)>;
    /// Tags attached to one object of one registered kind.
    fn tags_for(&self, entity: &str, object_id: i32) -> RepositoryResult<Vec<Tag>>;
    /// Follow a tagged item to the object it points to. Returns
    /// `Ok(None)` when the target row no longer exists.
    fn resolve_tagged_item(
        &self,
        registry: &TypeRegistry,
        tagged_item_id: i32,
    ) -> RepositoryResult<Option<TaggedObject>>;
    /// Kind keys currently present in the persisted registry.
    fn list_entity_kinds(&self) -> RepositoryResult<Vec<String>>;
}

/// Write operations over tagged items and the entity-kind registry.
pub trait TaggedItemWriter {
    fn create_tagged_item(&self, new_item: &NewTaggedItem) -> RepositoryResult<TaggedItem>;
    fn delete_tagged_item(&self, tagged_item_id: i32) -> RepositoryResult<()>;
    /// Persist a kind key in the registry; registering an existing kind
    /// is a no-op.
    fn register_entity_kind(&self, entity: &str) -> RepositoryResult<()>;
}
