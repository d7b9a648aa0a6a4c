/// Generates list/get/create/update/delete handlers for a crudcrate resource
/// whose hooks raise validation or protection errors, plus a `crud_router`
/// serving them. Failures are answered with `BusinessError` bodies, so a hook
/// refusing a payload yields 400 and a refused deletion yields 409.
///
/// `?filter=`, `?range=`/`?page=` and `?sort=` behave like crudcrate's
/// generated list endpoint, including the `Content-Range` header.
#[macro_export]
macro_rules! checked_crud_handlers {
    ($resource:ty, $create_model:ty, $update_model:ty, $list_model:ty, $tag:literal) => {
        #[utoipa::path(
            get,
            path = "/",
            params(crudcrate::models::FilterOptions),
            responses(
                (status = axum::http::StatusCode::OK, description = "List of resources", body = [$list_model]),
            ),
            operation_id = format!("get_all_{}", <$resource as crudcrate::traits::CRUDResource>::RESOURCE_NAME_PLURAL),
            summary = format!("Get all {}", <$resource as crudcrate::traits::CRUDResource>::RESOURCE_NAME_PLURAL),
            description = format!("{}", <$resource as crudcrate::traits::CRUDResource>::RESOURCE_DESCRIPTION),
            tag = $tag
        )]
        pub async fn get_all_handler(
            axum::extract::Query(params): axum::extract::Query<crudcrate::models::FilterOptions>,
            axum::extract::State(state): axum::extract::State<$crate::common::state::AppState>,
        ) -> $crate::common::errors::BusinessResult<(
            axum::http::HeaderMap,
            axum::Json<Vec<$list_model>>,
        )> {
            use crudcrate::traits::CRUDResource as _;
            use sea_orm::ConnectionTrait as _;
            use $crate::common::errors::DbErrorExt as _;

            let (offset, limit) = crudcrate::filter::parse_pagination(&params);
            let condition = crudcrate::filter::apply_filters::<$resource>(
                params.filter.clone(),
                &<$resource>::filterable_columns(),
                state.db.get_database_backend(),
            );
            let (order_column, order_direction) = crudcrate::sort::parse_sorting(
                &params,
                &<$resource>::sortable_columns(),
                <$resource>::default_index_column(),
            );
            let items = <$resource>::get_all(
                &state.db,
                &condition,
                order_column,
                order_direction,
                offset,
                limit,
            )
            .await
            .map_err(|e| e.to_business_error(<$resource>::RESOURCE_NAME_SINGULAR))?;
            let total = <$resource>::total_count(&state.db, &condition).await;
            let headers = crudcrate::pagination::calculate_content_range(
                offset,
                limit,
                total,
                <$resource>::RESOURCE_NAME_PLURAL,
            );
            Ok((headers, axum::Json(items)))
        }

        #[utoipa::path(
            get,
            path = "/{id}",
            params(("id" = uuid::Uuid, Path, description = "Resource ID")),
            responses(
                (status = axum::http::StatusCode::OK, description = "The requested resource", body = $resource),
                (status = axum::http::StatusCode::NOT_FOUND, description = "Resource not found"),
            ),
            operation_id = format!("get_one_{}", <$resource as crudcrate::traits::CRUDResource>::RESOURCE_NAME_SINGULAR),
            summary = format!("Get one {}", <$resource as crudcrate::traits::CRUDResource>::RESOURCE_NAME_SINGULAR),
            tag = $tag
        )]
        pub async fn get_one_handler(
            axum::extract::Path(id): axum::extract::Path<uuid::Uuid>,
            axum::extract::State(state): axum::extract::State<$crate::common::state::AppState>,
        ) -> $crate::common::errors::BusinessResult<axum::Json<$resource>> {
            use crudcrate::traits::CRUDResource as _;
            use $crate::common::errors::DbErrorExt as _;

            <$resource>::get_one(&state.db, id)
                .await
                .map(axum::Json)
                .map_err(|e| match e {
                    sea_orm::DbErr::RecordNotFound(_) => {
                        $crate::not_found!(<$resource>::RESOURCE_NAME_SINGULAR.replace('_', " "), id)
                    }
                    other => other.to_business_error(<$resource>::RESOURCE_NAME_SINGULAR),
                })
        }

        #[utoipa::path(
            post,
            path = "/",
            request_body = $create_model,
            responses(
                (status = axum::http::StatusCode::CREATED, description = "Resource created", body = $resource),
                (status = axum::http::StatusCode::BAD_REQUEST, description = "Invalid payload"),
                (status = axum::http::StatusCode::CONFLICT, description = "Duplicate record"),
            ),
            operation_id = format!("create_one_{}", <$resource as crudcrate::traits::CRUDResource>::RESOURCE_NAME_SINGULAR),
            summary = format!("Create one {}", <$resource as crudcrate::traits::CRUDResource>::RESOURCE_NAME_SINGULAR),
            tag = $tag
        )]
        pub async fn create_one_handler(
            axum::extract::State(state): axum::extract::State<$crate::common::state::AppState>,
            payload: Result<axum::Json<$create_model>, axum::extract::rejection::JsonRejection>,
        ) -> $crate::common::errors::BusinessResult<(axum::http::StatusCode, axum::Json<$resource>)> {
            use crudcrate::traits::CRUDResource as _;
            use $crate::common::errors::DbErrorExt as _;

            let axum::Json(payload) = payload?;
            let created = <$resource>::create(&state.db, payload)
                .await
                .map_err(|e| e.to_business_error(<$resource>::RESOURCE_NAME_SINGULAR))?;
            Ok((axum::http::StatusCode::CREATED, axum::Json(created)))
        }

        #[utoipa::path(
            put,
            path = "/{id}",
            params(("id" = uuid::Uuid, Path, description = "Resource ID")),
            request_body = $update_model,
            responses(
                (status = axum::http::StatusCode::OK, description = "Resource updated", body = $resource),
                (status = axum::http::StatusCode::BAD_REQUEST, description = "Invalid payload"),
                (status = axum::http::StatusCode::NOT_FOUND, description = "Resource not found"),
                (status = axum::http::StatusCode::CONFLICT, description = "Duplicate record"),
            ),
            operation_id = format!("update_one_{}", <$resource as crudcrate::traits::CRUDResource>::RESOURCE_NAME_SINGULAR),
            summary = format!("Update one {}", <$resource as crudcrate::traits::CRUDResource>::RESOURCE_NAME_SINGULAR),
            tag = $tag
        )]
        pub async fn update_one_handler(
            axum::extract::Path(id): axum::extract::Path<uuid::Uuid>,
            axum::extract::State(state): axum::extract::State<$crate::common::state::AppState>,
            payload: Result<axum::Json<$update_model>, axum::extract::rejection::JsonRejection>,
        ) -> $crate::common::errors::BusinessResult<axum::Json<$resource>> {
            use crudcrate::traits::CRUDResource as _;
            use $crate::common::errors::DbErrorExt as _;

            let axum::Json(payload) = payload?;
            <$resource>::update(&state.db, id, payload)
                .await
                .map(axum::Json)
                .map_err(|e| match e {
                    sea_orm::DbErr::RecordNotFound(_) => {
                        $crate::not_found!(<$resource>::RESOURCE_NAME_SINGULAR.replace('_', " "), id)
                    }
                    other => other.to_business_error(<$resource>::RESOURCE_NAME_SINGULAR),
                })
        }

        #[utoipa::path(
            delete,
            path = "/{id}",
            params(("id" = uuid::Uuid, Path, description = "Resource ID")),
            responses(
                (status = axum::http::StatusCode::NO_CONTENT, description = "Resource deleted"),
                (status = axum::http::StatusCode::NOT_FOUND, description = "Resource not found"),
                (status = axum::http::StatusCode::CONFLICT, description = "Resource is still referenced"),
            ),
            operation_id = format!("delete_one_{}", <$resource as crudcrate::traits::CRUDResource>::RESOURCE_NAME_SINGULAR),
            summary = format!("Delete one {}", <$resource as crudcrate::traits::CRUDResource>::RESOURCE_NAME_SINGULAR),
            tag = $tag
        )]
        pub async fn delete_one_handler(
            axum::extract::Path(id): axum::extract::Path<uuid::Uuid>,
            axum::extract::State(state): axum::extract::State<$crate::common::state::AppState>,
        ) -> $crate::common::errors::BusinessResult<axum::http::StatusCode> {
            use crudcrate::traits::CRUDResource as _;
            use $crate::common::errors::DbErrorExt as _;

            <$resource>::delete(&state.db, id)
                .await
                .map(|_| axum::http::StatusCode::NO_CONTENT)
                .map_err(|e| match e {
                    sea_orm::DbErr::RecordNotFound(_) => {
                        $crate::not_found!(<$resource>::RESOURCE_NAME_SINGULAR.replace('_', " "), id)
                    }
                    other => other.to_business_error(<$resource>::RESOURCE_NAME_SINGULAR),
                })
        }

        pub fn crud_router(
            state: &$crate::common::state::AppState,
        ) -> utoipa_axum::router::OpenApiRouter {
            utoipa_axum::router::OpenApiRouter::new()
                .routes(utoipa_axum::routes!(get_all_handler, create_one_handler))
                .routes(utoipa_axum::routes!(
                    get_one_handler,
                    update_one_handler,
                    delete_one_handler
                ))
                .with_state(state.clone())
        }
    };
}
