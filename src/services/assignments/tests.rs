//! 作业操作门面测试
//!
//! 通过内存存储替身直接驱动各操作，覆盖完整生命周期与各角色的
//! 访问控制边界。

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::HttpResponse;
use actix_web::test::TestRequest;
use serde_json::Value;

use super::AssignmentService;
use crate::errors::Result;
use crate::models::assignments::entities::{Assignment, AssignmentState, Grade};
use crate::models::assignments::requests::{
    GradeAssignmentRequest, RegradeAssignmentRequest, SubmitAssignmentRequest,
    UpsertAssignmentRequest,
};
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;

// 内存存储替身
#[derive(Default)]
struct MemoryStorage {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    users: HashMap<i64, User>,
    assignments: HashMap<i64, Assignment>,
    next_user_id: i64,
    next_assignment_id: i64,
}

impl MemoryStorage {
    fn new() -> Self {
        Self::default()
    }

    fn seed_user(&self, id: i64, username: &str, role: UserRole) -> User {
        let now = chrono::Utc::now();
        let user = User {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: String::new(),
            role,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        let mut state = self.state.lock().unwrap();
        state.next_user_id = state.next_user_id.max(id);
        state.users.insert(id, user.clone());
        user
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn create_user(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now();
        let mut state = self.state.lock().unwrap();
        state.next_user_id += 1;
        let user = User {
            id: state.next_user_id,
            username: req.username,
            email: req.email,
            password_hash: req.password,
            role: req.role,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.state.lock().unwrap().users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list_teachers(&self) -> Result<Vec<User>> {
        let mut teachers: Vec<User> = self
            .state
            .lock()
            .unwrap()
            .users
            .values()
            .filter(|u| u.role == UserRole::Teacher)
            .cloned()
            .collect();
        teachers.sort_by_key(|u| u.id);
        Ok(teachers)
    }

    async fn count_users(&self) -> Result<u64> {
        Ok(self.state.lock().unwrap().users.len() as u64)
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        match state.users.get_mut(&id) {
            Some(user) => {
                user.last_login = Some(chrono::Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        Ok(self.state.lock().unwrap().assignments.get(&id).cloned())
    }

    async fn create_assignment(&self, student_id: i64, content: String) -> Result<Assignment> {
        let now = chrono::Utc::now();
        let mut state = self.state.lock().unwrap();
        state.next_assignment_id += 1;
        let assignment = Assignment {
            id: state.next_assignment_id,
            student_id,
            teacher_id: None,
            content,
            grade: None,
            state: AssignmentState::Draft,
            created_at: now,
            updated_at: now,
        };
        state.assignments.insert(assignment.id, assignment.clone());
        Ok(assignment)
    }

    async fn update_assignment(
        &self,
        assignment: &Assignment,
        expected: AssignmentState,
    ) -> Result<Option<Assignment>> {
        let mut state = self.state.lock().unwrap();
        match state.assignments.get_mut(&assignment.id) {
            // 与数据库实现一致：状态守卫未命中时不写入
            Some(stored) if stored.state == expected => {
                let mut updated = assignment.clone();
                updated.updated_at = chrono::Utc::now();
                *stored = updated.clone();
                Ok(Some(updated))
            }
            _ => Ok(None),
        }
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        Ok(self.state.lock().unwrap().assignments.remove(&id).is_some())
    }

    async fn list_assignments_by_student(&self, student_id: i64) -> Result<Vec<Assignment>> {
        let mut list: Vec<Assignment> = self
            .state
            .lock()
            .unwrap()
            .assignments
            .values()
            .filter(|a| a.student_id == student_id)
            .cloned()
            .collect();
        list.sort_by_key(|a| a.id);
        Ok(list)
    }

    async fn list_submitted_assignments_by_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<Assignment>> {
        let mut list: Vec<Assignment> = self
            .state
            .lock()
            .unwrap()
            .assignments
            .values()
            .filter(|a| a.student_id == student_id && a.state == AssignmentState::Submitted)
            .cloned()
            .collect();
        list.sort_by_key(|a| a.id);
        Ok(list)
    }

    async fn list_assignments_by_teacher(&self, teacher_id: i64) -> Result<Vec<Assignment>> {
        let mut list: Vec<Assignment> = self
            .state
            .lock()
            .unwrap()
            .assignments
            .values()
            .filter(|a| a.teacher_id == Some(teacher_id))
            .cloned()
            .collect();
        list.sort_by_key(|a| a.id);
        Ok(list)
    }

    async fn list_submitted_and_graded_assignments(&self) -> Result<Vec<Assignment>> {
        let mut list: Vec<Assignment> = self
            .state
            .lock()
            .unwrap()
            .assignments
            .values()
            .filter(|a| a.state != AssignmentState::Draft)
            .cloned()
            .collect();
        list.sort_by_key(|a| a.id);
        Ok(list)
    }
}

// 固定的测试环境：学生 1、学生 4、教师 2、教师 3、校长 9
struct Fixture {
    storage: Arc<MemoryStorage>,
    service: AssignmentService,
    teacher2: User,
    teacher3: User,
    principal: User,
    student: User,
}

fn fixture() -> Fixture {
    let storage = Arc::new(MemoryStorage::new());
    let student = storage.seed_user(1, "student1", UserRole::Student);
    let teacher2 = storage.seed_user(2, "teacher2", UserRole::Teacher);
    let teacher3 = storage.seed_user(3, "teacher3", UserRole::Teacher);
    storage.seed_user(4, "student4", UserRole::Student);
    let principal = storage.seed_user(9, "principal", UserRole::Principal);
    let service = AssignmentService::with_storage(storage.clone() as Arc<dyn Storage>);
    Fixture {
        storage,
        service,
        teacher2,
        teacher3,
        principal,
        student,
    }
}

async fn body_json(response: HttpResponse) -> Value {
    let bytes = actix_web::body::to_bytes(response.into_body())
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn upsert(content: &str) -> UpsertAssignmentRequest {
    UpsertAssignmentRequest {
        id: None,
        content: Some(content.to_string()),
    }
}

#[actix_web::test]
async fn test_full_assignment_lifecycle() {
    let f = fixture();
    let req = TestRequest::default().to_http_request();

    // 学生 1 创建草稿
    let resp = f
        .service
        .upsert_draft(&req, f.student.id, upsert("ABCD TESTPOST"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_json(resp).await;
    let assignment_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["state"], "DRAFT");
    assert_eq!(body["data"]["teacher_id"], Value::Null);
    assert_eq!(body["data"]["grade"], Value::Null);
    assert_eq!(body["data"]["content"], "ABCD TESTPOST");

    // 提交给教师 2
    let resp = f
        .service
        .submit_assignment(
            &req,
            f.student.id,
            SubmitAssignmentRequest {
                id: assignment_id,
                teacher_id: f.teacher2.id,
            },
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["state"], "SUBMITTED");
    assert_eq!(body["data"]["teacher_id"], 2);

    // 重复提交被拒绝
    let resp = f
        .service
        .submit_assignment(
            &req,
            f.student.id,
            SubmitAssignmentRequest {
                id: assignment_id,
                teacher_id: f.teacher3.id,
            },
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "only a draft assignment can be submitted");

    // 教师 3 批改（作业指派给教师 2，利益冲突守卫不触发）
    let resp = f
        .service
        .grade_assignment(
            &req,
            &f.teacher3,
            GradeAssignmentRequest {
                id: assignment_id,
                grade: Grade::A,
            },
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["state"], "GRADED");
    assert_eq!(body["data"]["grade"], "A");

    // 校长复批覆盖评级
    let resp = f
        .service
        .regrade_assignment(
            &req,
            &f.principal,
            assignment_id,
            RegradeAssignmentRequest { grade: Grade::C },
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["state"], "GRADED");
    assert_eq!(body["data"]["grade"], "C");
}

#[actix_web::test]
async fn test_upsert_requires_content() {
    let f = fixture();
    let req = TestRequest::default().to_http_request();

    let resp = f
        .service
        .upsert_draft(
            &req,
            f.student.id,
            UpsertAssignmentRequest {
                id: None,
                content: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Content cannot be null.");
}

#[actix_web::test]
async fn test_edit_draft_and_reject_edit_after_submit() {
    let f = fixture();
    let req = TestRequest::default().to_http_request();

    let resp = f
        .service
        .upsert_draft(&req, f.student.id, upsert("first version"))
        .await
        .unwrap();
    let id = body_json(resp).await["data"]["id"].as_i64().unwrap();

    // 草稿阶段可编辑
    let resp = f
        .service
        .upsert_draft(
            &req,
            f.student.id,
            UpsertAssignmentRequest {
                id: Some(id),
                content: Some("second version".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["content"], "second version");

    f.service
        .submit_assignment(
            &req,
            f.student.id,
            SubmitAssignmentRequest {
                id,
                teacher_id: f.teacher2.id,
            },
        )
        .await
        .unwrap();

    // 提交后内容冻结
    let resp = f
        .service
        .upsert_draft(
            &req,
            f.student.id,
            UpsertAssignmentRequest {
                id: Some(id),
                content: Some("third version".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Only draft assignments can be edited");
}

#[actix_web::test]
async fn test_student_cannot_touch_other_students_assignment() {
    let f = fixture();
    let req = TestRequest::default().to_http_request();

    let resp = f
        .service
        .upsert_draft(&req, f.student.id, upsert("private draft"))
        .await
        .unwrap();
    let id = body_json(resp).await["data"]["id"].as_i64().unwrap();

    // 他人的作业一律报告为不存在，而不是无权限
    let resp = f.service.get_student_assignment(&req, 4, id).await.unwrap();
    assert_eq!(resp.status(), 404);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Assignment not found");

    let resp = f.service.delete_draft(&req, 4, id).await.unwrap();
    assert_eq!(resp.status(), 404);

    let resp = f
        .service
        .submit_assignment(
            &req,
            4,
            SubmitAssignmentRequest {
                id,
                teacher_id: f.teacher2.id,
            },
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Assignment not found or access denied.");
}

#[actix_web::test]
async fn test_submit_requires_existing_teacher() {
    let f = fixture();
    let req = TestRequest::default().to_http_request();

    let resp = f
        .service
        .upsert_draft(&req, f.student.id, upsert("draft"))
        .await
        .unwrap();
    let id = body_json(resp).await["data"]["id"].as_i64().unwrap();

    // 不存在的用户
    let resp = f
        .service
        .submit_assignment(
            &req,
            f.student.id,
            SubmitAssignmentRequest {
                id,
                teacher_id: 999,
            },
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Teacher not found");

    // 存在但不是教师角色
    let resp = f
        .service
        .submit_assignment(
            &req,
            f.student.id,
            SubmitAssignmentRequest { id, teacher_id: 4 },
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Teacher not found");
}

#[actix_web::test]
async fn test_grade_draft_rejected_for_all_graders() {
    let f = fixture();
    let req = TestRequest::default().to_http_request();

    let resp = f
        .service
        .upsert_draft(&req, f.student.id, upsert("draft"))
        .await
        .unwrap();
    let id = body_json(resp).await["data"]["id"].as_i64().unwrap();

    let resp = f
        .service
        .grade_assignment(
            &req,
            &f.teacher2,
            GradeAssignmentRequest { id, grade: Grade::A },
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Draft assignment cannot be graded");

    // 校长同样不能批改草稿
    let resp = f
        .service
        .grade_assignment(
            &req,
            &f.principal,
            GradeAssignmentRequest { id, grade: Grade::A },
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Draft assignment cannot be graded");
}

#[actix_web::test]
async fn test_teacher_cannot_grade_own_assignment() {
    let f = fixture();
    let req = TestRequest::default().to_http_request();

    let resp = f
        .service
        .upsert_draft(&req, f.student.id, upsert("submitted work"))
        .await
        .unwrap();
    let id = body_json(resp).await["data"]["id"].as_i64().unwrap();
    f.service
        .submit_assignment(
            &req,
            f.student.id,
            SubmitAssignmentRequest {
                id,
                teacher_id: f.teacher2.id,
            },
        )
        .await
        .unwrap();

    // 指派给自己名下的作业触发利益冲突守卫
    let resp = f
        .service
        .grade_assignment(
            &req,
            &f.teacher2,
            GradeAssignmentRequest { id, grade: Grade::A },
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "You cannot grade your own assignment");

    // 校长不受该守卫约束
    let resp = f
        .service
        .grade_assignment(
            &req,
            &f.principal,
            GradeAssignmentRequest { id, grade: Grade::B },
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_student_cannot_grade() {
    let f = fixture();
    let req = TestRequest::default().to_http_request();

    let resp = f
        .service
        .upsert_draft(&req, f.student.id, upsert("work"))
        .await
        .unwrap();
    let id = body_json(resp).await["data"]["id"].as_i64().unwrap();
    f.service
        .submit_assignment(
            &req,
            f.student.id,
            SubmitAssignmentRequest {
                id,
                teacher_id: f.teacher2.id,
            },
        )
        .await
        .unwrap();

    let resp = f
        .service
        .grade_assignment(
            &req,
            &f.student,
            GradeAssignmentRequest { id, grade: Grade::A },
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Students cannot grade assignments");
}

#[actix_web::test]
async fn test_teacher_detail_view_distinguishes_forbidden_from_not_found() {
    let f = fixture();
    let req = TestRequest::default().to_http_request();

    let resp = f
        .service
        .upsert_draft(&req, f.student.id, upsert("for teacher 2"))
        .await
        .unwrap();
    let id = body_json(resp).await["data"]["id"].as_i64().unwrap();
    f.service
        .submit_assignment(
            &req,
            f.student.id,
            SubmitAssignmentRequest {
                id,
                teacher_id: f.teacher2.id,
            },
        )
        .await
        .unwrap();

    // 本人可见
    let resp = f
        .service
        .get_teacher_assignment(&req, f.teacher2.id, id)
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // 他人的作业是 403，而不是其他入口的 404
    let resp = f
        .service
        .get_teacher_assignment(&req, f.teacher3.id, id)
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
    let body = body_json(resp).await;
    assert_eq!(
        body["message"],
        "You do not have permission to view this assignment"
    );

    // 不存在的作业仍是 404
    let resp = f
        .service
        .get_teacher_assignment(&req, f.teacher2.id, 999)
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_delete_draft_then_absent() {
    let f = fixture();
    let req = TestRequest::default().to_http_request();

    let resp = f
        .service
        .upsert_draft(&req, f.student.id, upsert("to delete"))
        .await
        .unwrap();
    let id = body_json(resp).await["data"]["id"].as_i64().unwrap();

    let resp = f.service.delete_draft(&req, f.student.id, id).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Assignment deleted successfully.");

    // 删除后实体不复存在
    let resp = f
        .service
        .get_student_assignment(&req, f.student.id, id)
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_delete_submitted_rejected() {
    let f = fixture();
    let req = TestRequest::default().to_http_request();

    let resp = f
        .service
        .upsert_draft(&req, f.student.id, upsert("submitted"))
        .await
        .unwrap();
    let id = body_json(resp).await["data"]["id"].as_i64().unwrap();
    f.service
        .submit_assignment(
            &req,
            f.student.id,
            SubmitAssignmentRequest {
                id,
                teacher_id: f.teacher2.id,
            },
        )
        .await
        .unwrap();

    let resp = f.service.delete_draft(&req, f.student.id, id).await.unwrap();
    assert_eq!(resp.status(), 400);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Only draft assignments can be deleted");
}

#[actix_web::test]
async fn test_role_scoped_lists() {
    let f = fixture();
    let req = TestRequest::default().to_http_request();

    // 学生 1：一份草稿 + 一份提交给教师 2 的作业 + 一份已批改的作业
    f.service
        .upsert_draft(&req, f.student.id, upsert("draft only"))
        .await
        .unwrap();
    let resp = f
        .service
        .upsert_draft(&req, f.student.id, upsert("submitted work"))
        .await
        .unwrap();
    let submitted_id = body_json(resp).await["data"]["id"].as_i64().unwrap();
    f.service
        .submit_assignment(
            &req,
            f.student.id,
            SubmitAssignmentRequest {
                id: submitted_id,
                teacher_id: f.teacher2.id,
            },
        )
        .await
        .unwrap();

    let resp = f
        .service
        .upsert_draft(&req, f.student.id, upsert("graded work"))
        .await
        .unwrap();
    let graded_id = body_json(resp).await["data"]["id"].as_i64().unwrap();
    f.service
        .submit_assignment(
            &req,
            f.student.id,
            SubmitAssignmentRequest {
                id: graded_id,
                teacher_id: f.teacher2.id,
            },
        )
        .await
        .unwrap();
    f.service
        .grade_assignment(
            &req,
            &f.teacher3,
            GradeAssignmentRequest {
                id: graded_id,
                grade: Grade::B,
            },
        )
        .await
        .unwrap();

    // 学生看到全部三份
    let resp = f
        .service
        .list_student_assignments(&req, f.student.id)
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    // 已提交视图只含 SUBMITTED 状态，草稿与已批改都不出现
    let resp = f
        .service
        .list_submitted_assignments(&req, f.student.id)
        .await
        .unwrap();
    let body = body_json(resp).await;
    let list = body["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], submitted_id);
    assert!(list.iter().all(|a| a["state"] == "SUBMITTED"));

    // 教师 2 看到指派给自己的两份，教师 3 看不到任何作业
    let resp = f
        .service
        .list_teacher_assignments(&req, f.teacher2.id)
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let resp = f
        .service
        .list_teacher_assignments(&req, f.teacher3.id)
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // 校长视图含已提交与已批改，不含草稿
    let resp = f.service.list_principal_assignments(&req).await.unwrap();
    let body = body_json(resp).await;
    let list = body["data"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|a| a["state"] != "DRAFT"));
}

#[actix_web::test]
async fn test_graded_assignment_leaves_submitted_list() {
    let f = fixture();
    let req = TestRequest::default().to_http_request();

    let resp = f
        .service
        .upsert_draft(&req, f.student.id, upsert("handed in"))
        .await
        .unwrap();
    let id = body_json(resp).await["data"]["id"].as_i64().unwrap();
    f.service
        .submit_assignment(
            &req,
            f.student.id,
            SubmitAssignmentRequest {
                id,
                teacher_id: f.teacher2.id,
            },
        )
        .await
        .unwrap();

    // 批改前出现在已提交视图
    let resp = f
        .service
        .list_submitted_assignments(&req, f.student.id)
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    f.service
        .grade_assignment(
            &req,
            &f.teacher3,
            GradeAssignmentRequest { id, grade: Grade::A },
        )
        .await
        .unwrap();

    // 批改后从已提交视图消失，但仍在学生的全部作业里
    let resp = f
        .service
        .list_submitted_assignments(&req, f.student.id)
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    let resp = f
        .service
        .list_student_assignments(&req, f.student.id)
        .await
        .unwrap();
    let body = body_json(resp).await;
    let list = body["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["state"], "GRADED");
}

#[actix_web::test]
async fn test_grade_not_found() {
    let f = fixture();
    let req = TestRequest::default().to_http_request();

    let resp = f
        .service
        .grade_assignment(
            &req,
            &f.teacher2,
            GradeAssignmentRequest {
                id: 999,
                grade: Grade::A,
            },
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Assignment not found");
}

#[actix_web::test]
async fn test_concurrent_update_guard() {
    let f = fixture();
    let storage: Arc<dyn Storage> = f.storage.clone();

    let created = storage.create_assignment(1, "racing".to_string()).await.unwrap();

    // 两个调用者基于同一份 DRAFT 读取各自构造提交
    let mut first = created.clone();
    first.submit_to(2).unwrap();
    let mut second = created.clone();
    second.submit_to(3).unwrap();

    // 第一个写入命中守卫，第二个因状态已变更而落空
    let result = storage
        .update_assignment(&first, AssignmentState::Draft)
        .await
        .unwrap();
    assert!(result.is_some());
    let result = storage
        .update_assignment(&second, AssignmentState::Draft)
        .await
        .unwrap();
    assert!(result.is_none());

    // 最终状态来自第一个写入
    let stored = storage.get_assignment_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored.teacher_id, Some(2));
    assert_eq!(stored.state, AssignmentState::Submitted);
}
