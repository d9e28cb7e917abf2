//! 批改与复批
//!
//! grade 是唯一按调用者角色分派的操作：教师受利益冲突守卫约束，
//! 校长可批改任何非草稿作业。状态机保证草稿不可批改、批改可反复
//! 覆盖（GRADED -> GRADED）。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{
    AssignmentService, access, access_denied_response, concurrent_update_response,
    storage_error_response, transition_rejected_response,
};
use crate::models::assignments::entities::Grade;
use crate::models::assignments::requests::{GradeAssignmentRequest, RegradeAssignmentRequest};
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};

/// POST /teacher/assignments/grade
/// POST /principal/assignments/grade
pub async fn grade_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    current_user: &User,
    req: GradeAssignmentRequest,
) -> ActixResult<HttpResponse> {
    apply_grade(service, request, current_user, req.id, req.grade).await
}

/// PUT /principal/assignments/{id}/regrade
///
/// 复批与批改走同一条转移路径，状态机允许 GRADED -> GRADED。
pub async fn regrade_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    current_user: &User,
    assignment_id: i64,
    req: RegradeAssignmentRequest,
) -> ActixResult<HttpResponse> {
    apply_grade(service, request, current_user, assignment_id, req.grade).await
}

async fn apply_grade(
    service: &AssignmentService,
    request: &HttpRequest,
    current_user: &User,
    assignment_id: i64,
    grade: Grade,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let mut assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            )));
        }
        Err(e) => return Ok(storage_error_response("查询作业失败", &e)),
    };

    // 按调用者角色执行访问控制
    match current_user.role {
        UserRole::Teacher => {
            if let Err(denied) = access::teacher_can_grade(current_user.id, &assignment) {
                return Ok(access_denied_response(denied));
            }
        }
        // 校长可批改任何非草稿作业，草稿由状态机拒绝
        UserRole::Principal => {}
        UserRole::Student => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "Students cannot grade assignments",
            )));
        }
    }

    let previous_state = assignment.state;
    if let Err(e) = assignment.apply_grade(grade) {
        return Ok(transition_rejected_response(&e));
    }

    match storage.update_assignment(&assignment, previous_state).await {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "批改成功"))),
        Ok(None) => Ok(concurrent_update_response()),
        Err(e) => Ok(storage_error_response("批改作业失败", &e)),
    }
}
