use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use catalog_common::error::Result;
use catalog_common::store::ProductStore;
use catalog_common::{CatalogError, Category, NewProduct, Product, ProductAttribute, ProductDetail};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::entity::{category, product, product_attribute};

impl TryFrom<product::Model> for Product {
    type Error = CatalogError;

    fn try_from(m: product::Model) -> Result<Self> {
        let images = serde_json::from_value(m.images).map_err(|e| {
            CatalogError::Store(format!("Product {} has malformed images: {e}", m.id))
        })?;
        Ok(Self {
            id: m.id,
            title: m.title,
            price: m.price,
            description: m.description,
            category_id: m.category_id,
            images,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}

pub struct SeaProductStore {
    db: DatabaseConnection,
}

impl SeaProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductStore for SeaProductStore {
    async fn insert(&self, input: NewProduct) -> Result<Product> {
        let now = Utc::now();
        let model = product::ActiveModel {
            title: Set(input.title),
            price: Set(input.price),
            description: Set(input.description),
            images: Set(serde_json::Value::from(input.images)),
            category_id: Set(input.category_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Product::try_from(model)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>> {
        product::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Product::try_from)
            .transpose()
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Product>> {
        product::Entity::find()
            .filter(product::Column::Title.eq(title))
            .one(&self.db)
            .await?
            .map(Product::try_from)
            .transpose()
    }

    async fn find_with_relations(&self, id: i32) -> Result<Option<ProductDetail>> {
        let Some(model) = product::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let category = category::Entity::find_by_id(model.category_id)
            .one(&self.db)
            .await?
            .map(Category::from);

        let attributes = product_attribute::Entity::find()
            .filter(product_attribute::Column::ProductId.eq(id))
            .order_by_asc(product_attribute::Column::AttributeId)
            .all(&self.db)
            .await?
            .into_iter()
            .map(ProductAttribute::from)
            .collect();

        Ok(Some(ProductDetail {
            product: Product::try_from(model)?,
            category,
            attributes,
        }))
    }

    async fn find_all_with_relations(&self) -> Result<Vec<ProductDetail>> {
        let products = product::Entity::find()
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let category_ids: BTreeSet<i32> = products.iter().map(|p| p.category_id).collect();
        let categories: HashMap<i32, Category> = category::Entity::find()
            .filter(category::Column::Id.is_in(category_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, Category::from(c)))
            .collect();

        let product_ids: Vec<i32> = products.iter().map(|p| p.id).collect();
        let mut attributes: HashMap<i32, Vec<ProductAttribute>> = HashMap::new();
        for row in product_attribute::Entity::find()
            .filter(product_attribute::Column::ProductId.is_in(product_ids))
            .order_by_asc(product_attribute::Column::ProductId)
            .order_by_asc(product_attribute::Column::AttributeId)
            .all(&self.db)
            .await?
        {
            attributes
                .entry(row.product_id)
                .or_default()
                .push(ProductAttribute::from(row));
        }

        products
            .into_iter()
            .map(|model| {
                let category = categories.get(&model.category_id).cloned();
                let attributes = attributes.remove(&model.id).unwrap_or_default();
                Ok(ProductDetail {
                    product: Product::try_from(model)?,
                    category,
                    attributes,
                })
            })
            .collect()
    }

    async fn find_all_newest_first(&self) -> Result<Vec<Product>> {
        product::Entity::find()
            .order_by_desc(product::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Product::try_from)
            .collect()
    }

    async fn save(&self, input: Product) -> Result<Product> {
        let id = input.id;
        // Images are written only on insert.
        let active = product::ActiveModel {
            id: ActiveValue::Unchanged(id),
            title: Set(input.title),
            price: Set(input.price),
            description: Set(input.description),
            category_id: Set(input.category_id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        match active.update(&self.db).await {
            Ok(model) => Product::try_from(model),
            Err(DbErr::RecordNotUpdated) => Err(CatalogError::ProductNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: i32) -> Result<u64> {
        let txn = self.db.begin().await?;

        product_attribute::Entity::delete_many()
            .filter(product_attribute::Column::ProductId.eq(id))
            .exec(&txn)
            .await?;
        let result = product::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected)
    }
}
