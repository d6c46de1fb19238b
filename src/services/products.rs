//! Product administration services.

use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::dto::pages::ProductsPageData;
use crate::forms::products::AddProductForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{ProductListQuery, ProductReader, ProductWriter};
use crate::services::{ListParams, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub fn list_products<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: ListParams,
) -> ServiceResult<ProductsPageData>
where
    R: ProductReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut query = ProductListQuery::new().paginate(params.page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(search) = &params.search {
        query = query.search(search.clone());
    }

    let (total, products) = repo.list_products(query)?;
    let products = Paginated::new(
        products,
        params.page,
        total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
        total,
    );

    Ok(ProductsPageData {
        products,
        search: params.search,
    })
}

pub fn add_product<R>(repo: &R, user: &AuthenticatedUser, form: AddProductForm) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    form.validate()?;

    let new_product: NewProduct = form.into();
    repo.create_product(&new_product)?;

    Ok(())
}

pub fn patch_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    updates: UpdateProduct,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    Ok(repo.update_product(product_id, &updates)?)
}

pub fn set_product_active<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    active: bool,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    patch_product(
        repo,
        user,
        product_id,
        UpdateProduct {
            active: Some(active),
            ..UpdateProduct::default()
        },
    )
}

pub fn delete_product<R>(repo: &R, user: &AuthenticatedUser, product_id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    repo.delete_product(product_id)?;
    Ok(())
}
