use axum::Json;
use axum::extract::State;

use auth::CurrentUser;
use auth::domain::repository::UserRepository;

use super::BlogAppState;
use crate::application::ExportUseCase;
use crate::domain::repository::BlogRepository;
use crate::error::BlogResult;
use crate::presentation::dto::ExportResponse;

/// GET /user/export-data
pub async fn export_data<R, U>(
    State(state): State<BlogAppState<R, U>>,
    CurrentUser(user): CurrentUser,
) -> BlogResult<Json<ExportResponse>>
where
    R: BlogRepository,
    U: UserRepository + Send + Sync + 'static,
{
    let export = ExportUseCase::new(state.repo.clone()).export(user).await?;

    Ok(Json(export.into()))
}
