use diesel::prelude::*;

use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProductListQuery, ProductReader, ProductWriter};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>> {
        use crate::models::product::Product as DbProduct;
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .find(id)
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(Into::into))
    }

    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        use crate::models::product::Product as DbProduct;
        use crate::schema::products;

        let mut conn = self.conn()?;
        let pattern = query.search.as_ref().map(|s| format!("%{s}%"));

        let mut items = products::table.into_boxed();
        let mut count = products::table.into_boxed();

        if let Some(category) = &query.category {
            items = items.filter(products::category.eq(category.clone()));
            count = count.filter(products::category.eq(category.clone()));
        }
        if let Some(active) = query.active {
            items = items.filter(products::active.eq(active));
            count = count.filter(products::active.eq(active));
        }
        if let Some(pattern) = &pattern {
            items = items.filter(
                products::name
                    .like(pattern.clone())
                    .or(products::description.like(pattern.clone())),
            );
            count = count.filter(
                products::name
                    .like(pattern.clone())
                    .or(products::description.like(pattern.clone())),
            );
        }

        let total: i64 = count.count().get_result(&mut conn)?;

        items = items.order(products::created_at.desc());
        if let Some(pagination) = &query.pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }

        let products = items
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total as usize, products))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
        use crate::models::product::{NewProduct as DbNewProduct, Product as DbProduct};
        use crate::schema::products;

        let mut conn = self.conn()?;
        let insertable: DbNewProduct = new_product.into();
        let created = diesel::insert_into(products::table)
            .values(&insertable)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product> {
        use crate::models::product::{Product as DbProduct, UpdateProduct as DbUpdateProduct};
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateProduct = updates.into();

        let updated = diesel::update(products::table.find(product_id))
            .set((&db_updates, products::updated_at.eq(diesel::dsl::now)))
            .get_result::<DbProduct>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let affected = diesel::delete(products::table.find(product_id)).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
