//! 作业操作门面
//!
//! 每个操作：加载实体 -> 执行访问控制谓词 -> 应用状态机转移 ->
//! 原子提交 -> 返回实体或错误。每次调用只写一个实体，无级联写入。

pub mod access;
pub mod delete;
pub mod detail;
pub mod grade;
pub mod list;
pub mod submit;
pub mod upsert;

#[cfg(test)]
mod tests;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::AssignFlowError;
use crate::models::assignments::requests::{
    GradeAssignmentRequest, RegradeAssignmentRequest, SubmitAssignmentRequest,
    UpsertAssignmentRequest,
};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

use access::AccessDenied;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    /// 测试注入用
    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_student_assignments(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_student_assignments(self, request, student_id).await
    }

    pub async fn list_submitted_assignments(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_submitted_assignments(self, request, student_id).await
    }

    pub async fn get_student_assignment(
        &self,
        request: &HttpRequest,
        student_id: i64,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_student_assignment(self, request, student_id, assignment_id).await
    }

    pub async fn upsert_draft(
        &self,
        request: &HttpRequest,
        student_id: i64,
        req: UpsertAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        upsert::upsert_draft(self, request, student_id, req).await
    }

    pub async fn submit_assignment(
        &self,
        request: &HttpRequest,
        student_id: i64,
        req: SubmitAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_assignment(self, request, student_id, req).await
    }

    pub async fn delete_draft(
        &self,
        request: &HttpRequest,
        student_id: i64,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_draft(self, request, student_id, assignment_id).await
    }

    pub async fn list_teacher_assignments(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_teacher_assignments(self, request, teacher_id).await
    }

    pub async fn get_teacher_assignment(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_teacher_assignment(self, request, teacher_id, assignment_id).await
    }

    pub async fn grade_assignment(
        &self,
        request: &HttpRequest,
        current_user: &User,
        req: GradeAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_assignment(self, request, current_user, req).await
    }

    pub async fn regrade_assignment(
        &self,
        request: &HttpRequest,
        current_user: &User,
        assignment_id: i64,
        req: RegradeAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        grade::regrade_assignment(self, request, current_user, assignment_id, req).await
    }

    pub async fn list_principal_assignments(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_principal_assignments(self, request).await
    }
}

// 访问判定失败 -> HTTP 响应
pub(crate) fn access_denied_response(denied: AccessDenied) -> HttpResponse {
    match denied {
        AccessDenied::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::AssignmentNotFound, msg))
        }
        AccessDenied::Forbidden(msg) => {
            HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, msg))
        }
        AccessDenied::Rejected(msg) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        }
    }
}

// 状态机拒绝 -> 400 响应（保留精确的拒绝文案）
pub(crate) fn transition_rejected_response(err: &AssignFlowError) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::InvalidStateTransition,
        err.message(),
    ))
}

// 存储故障 -> 500 响应，不吞错误
pub(crate) fn storage_error_response(context: &str, err: &AssignFlowError) -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("{context}: {err}"),
    ))
}

// 乐观并发守卫未命中：实体在读取后被并发修改
pub(crate) fn concurrent_update_response() -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::InvalidStateTransition,
        "Assignment was modified by another request, please retry",
    ))
}
