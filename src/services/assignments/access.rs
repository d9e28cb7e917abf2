//! 作业访问控制谓词
//!
//! 每个谓词都是 (调用者身份, 作业) 的纯函数，在状态机转移之前执行。
//! 可见性判定失败统一报告为"不存在"而非"无权限"，避免向不拥有该
//! ID 的学生或教师泄露资源存在性；唯一的例外是教师查看他人作业详情，
//! 这里沿用对外承诺的 403 语义，调用方依赖这一区分。

use crate::models::assignments::entities::Assignment;

/// 访问判定失败的类别，由操作门面映射为 HTTP 状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    /// 资源对调用者不可见，报告为不存在（404）
    NotFound(&'static str),
    /// 资源存在且可见，但调用者无权操作（403）
    Forbidden(&'static str),
    /// 利益冲突等业务拒绝，按请求错误处理（400）
    Rejected(&'static str),
}

impl AccessDenied {
    pub fn message(&self) -> &'static str {
        match self {
            AccessDenied::NotFound(msg)
            | AccessDenied::Forbidden(msg)
            | AccessDenied::Rejected(msg) => msg,
        }
    }
}

/// 学生查看/编辑/删除自己的作业：非本人的作业一律视为不存在
pub fn student_owns(student_id: i64, assignment: &Assignment) -> Result<(), AccessDenied> {
    if assignment.student_id != student_id {
        return Err(AccessDenied::NotFound("Assignment not found"));
    }
    Ok(())
}

/// 学生提交作业的归属检查（沿用提交接口的历史报错文案）
pub fn student_owns_for_submit(
    student_id: i64,
    assignment: &Assignment,
) -> Result<(), AccessDenied> {
    if assignment.student_id != student_id {
        return Err(AccessDenied::NotFound(
            "Assignment not found or access denied.",
        ));
    }
    Ok(())
}

/// 教师查看作业详情：只能查看提交给自己的作业
pub fn teacher_can_view(teacher_id: i64, assignment: &Assignment) -> Result<(), AccessDenied> {
    if assignment.teacher_id != Some(teacher_id) {
        return Err(AccessDenied::Forbidden(
            "You do not have permission to view this assignment",
        ));
    }
    Ok(())
}

/// 教师批改作业的利益冲突守卫：不能批改指派给自己名下的作业
pub fn teacher_can_grade(teacher_id: i64, assignment: &Assignment) -> Result<(), AccessDenied> {
    if assignment.teacher_id == Some(teacher_id) {
        return Err(AccessDenied::Rejected("You cannot grade your own assignment"));
    }
    Ok(())
}
