// 业务错误码，按 HTTP 状态语义分段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 400xx 请求错误
    BadRequest = 40000,
    ValidationError = 40001,
    PayloadNotFound = 40002,
    InvalidStateTransition = 40003,

    // 401xx 认证错误
    Unauthorized = 40100,
    AuthFailed = 40101,

    // 403xx 权限错误
    Forbidden = 40300,

    // 404xx 资源不存在
    NotFound = 40400,
    AssignmentNotFound = 40401,
    TeacherNotFound = 40402,
    UserNotFound = 40403,

    // 500xx 服务端错误
    InternalServerError = 50000,
}
