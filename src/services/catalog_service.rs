use crate::entities::{
    review_entity as reviews, service_category_entity as categories, service_entity as services,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::sea_query::{Alias, Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct CatalogService {
    pool: DatabaseConnection,
}

impl CatalogService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    pub async fn list_categories(&self) -> AppResult<Vec<CategoryResponse>> {
        let models = categories::Entity::find()
            .filter(categories::Column::IsActive.eq(true))
            .order_by_asc(categories::Column::Name)
            .all(&self.pool)
            .await?;
        Ok(models.into_iter().map(CategoryResponse::from).collect())
    }

    pub async fn create_category(&self, req: CreateCategoryRequest) -> AppResult<CategoryResponse> {
        if req.name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Category name must not be empty".to_string(),
            ));
        }
        let model = categories::ActiveModel {
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(CategoryResponse::from(model))
    }

    pub async fn update_category(
        &self,
        category_id: i64,
        req: UpdateCategoryRequest,
    ) -> AppResult<CategoryResponse> {
        let mut model = categories::Entity::find_by_id(category_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?
            .into_active_model();
        if let Some(name) = req.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(description) = req.description {
            model.description = Set(Some(description));
        }
        if let Some(is_active) = req.is_active {
            model.is_active = Set(is_active);
        }
        let updated = model.update(&self.pool).await?;
        Ok(CategoryResponse::from(updated))
    }

    // ------------------------------------------------------------------
    // Services
    // ------------------------------------------------------------------

    pub async fn list_services(
        &self,
        query: &ServiceListQuery,
    ) -> AppResult<PaginatedResponse<ServiceResponse>> {
        let params = PaginationParams {
            page: query.page,
            page_size: query.page_size,
        };

        let mut finder = services::Entity::find().filter(services::Column::IsActive.eq(true));
        if let Some(category_id) = query.category_id {
            finder = finder.filter(services::Column::CategoryId.eq(category_id));
        }

        let total = finder.clone().count(&self.pool).await? as i64;

        let models = finder
            .order_by_asc(services::Column::Name)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;
        let items: Vec<ServiceResponse> = models.into_iter().map(ServiceResponse::from).collect();

        Ok(PaginatedResponse::from_params(items, &params, total))
    }

    pub async fn get_service(&self, service_id: i64) -> AppResult<ServiceDetailResponse> {
        let service = services::Entity::find_by_id(service_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;

        let review_count = reviews::Entity::find()
            .filter(reviews::Column::ServiceId.eq(service_id))
            .count(&self.pool)
            .await? as i64;

        #[derive(Debug, sea_orm::FromQueryResult)]
        struct AvgRow {
            average_rating: Option<f64>,
        }
        let average_rating = reviews::Entity::find()
            .filter(reviews::Column::ServiceId.eq(service_id))
            .select_only()
            .column_as(
                Expr::expr(Func::avg(Expr::col(reviews::Column::Rating)))
                    .cast_as(Alias::new("double precision")),
                "average_rating",
            )
            .into_model::<AvgRow>()
            .one(&self.pool)
            .await?
            .and_then(|r| r.average_rating);

        Ok(ServiceDetailResponse {
            service: ServiceResponse::from(service),
            review_count,
            average_rating,
        })
    }

    pub async fn create_service(&self, req: CreateServiceRequest) -> AppResult<ServiceResponse> {
        if req.price_cents <= 0 {
            return Err(AppError::ValidationError(
                "Service price must be positive".to_string(),
            ));
        }
        if req.duration_minutes <= 0 {
            return Err(AppError::ValidationError(
                "Service duration must be positive".to_string(),
            ));
        }

        let category = categories::Entity::find_by_id(req.category_id)
            .one(&self.pool)
            .await?;
        if category.is_none() {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        let model = services::ActiveModel {
            category_id: Set(req.category_id),
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            price_cents: Set(req.price_cents),
            duration_minutes: Set(req.duration_minutes),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(ServiceResponse::from(model))
    }

    pub async fn update_service(
        &self,
        service_id: i64,
        req: UpdateServiceRequest,
    ) -> AppResult<ServiceResponse> {
        if let Some(price) = req.price_cents
            && price <= 0
        {
            return Err(AppError::ValidationError(
                "Service price must be positive".to_string(),
            ));
        }
        if let Some(duration) = req.duration_minutes
            && duration <= 0
        {
            return Err(AppError::ValidationError(
                "Service duration must be positive".to_string(),
            ));
        }
        if let Some(category_id) = req.category_id {
            let category = categories::Entity::find_by_id(category_id)
                .one(&self.pool)
                .await?;
            if category.is_none() {
                return Err(AppError::NotFound("Category not found".to_string()));
            }
        }

        let mut model = services::Entity::find_by_id(service_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?
            .into_active_model();
        if let Some(category_id) = req.category_id {
            model.category_id = Set(category_id);
        }
        if let Some(name) = req.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(description) = req.description {
            model.description = Set(Some(description));
        }
        if let Some(price) = req.price_cents {
            model.price_cents = Set(price);
        }
        if let Some(duration) = req.duration_minutes {
            model.duration_minutes = Set(duration);
        }
        if let Some(is_active) = req.is_active {
            model.is_active = Set(is_active);
        }
        let updated = model.update(&self.pool).await?;
        Ok(ServiceResponse::from(updated))
    }
}
