//! 作业实体与状态机
//!
//! 作业生命周期：DRAFT -> SUBMITTED -> GRADED，状态只向前推进，
//! 唯一的例外是已批改的作业可以被反复复批（GRADED -> GRADED）。
//! 所有状态转移规则集中在本模块，各角色的业务处理只负责鉴权后
//! 调用这里的转移方法。

use serde::{Deserialize, Serialize};

use crate::errors::{AssignFlowError, Result};

// 作业状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssignmentState {
    Draft,     // 草稿，仅作者可见可改
    Submitted, // 已提交给指定教师，内容冻结
    Graded,    // 已批改，可复批
}

impl AssignmentState {
    pub const DRAFT: &'static str = "DRAFT";
    pub const SUBMITTED: &'static str = "SUBMITTED";
    pub const GRADED: &'static str = "GRADED";
}

impl<'de> Deserialize<'de> for AssignmentState {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for AssignmentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentState::Draft => write!(f, "{}", AssignmentState::DRAFT),
            AssignmentState::Submitted => write!(f, "{}", AssignmentState::SUBMITTED),
            AssignmentState::Graded => write!(f, "{}", AssignmentState::GRADED),
        }
    }
}

impl std::str::FromStr for AssignmentState {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            AssignmentState::DRAFT => Ok(AssignmentState::Draft),
            AssignmentState::SUBMITTED => Ok(AssignmentState::Submitted),
            AssignmentState::GRADED => Ok(AssignmentState::Graded),
            _ => Err(format!(
                "Invalid assignment state: '{s}'. Supported states: DRAFT, SUBMITTED, GRADED"
            )),
        }
    }
}

// 评级，从优到劣排序，仅用于展示，无数值语义
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Grade {
    A,
    B,
    C,
    D,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            _ => Err(format!(
                "Invalid grade value: '{s}'. Supported grades: A, B, C, D"
            )),
        }
    }
}

// 作业实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    // 作者，创建后不可变
    pub student_id: i64,
    // 批改教师，提交时设置一次
    pub teacher_id: Option<i64>,
    pub content: String,
    pub grade: Option<Grade>,
    pub state: AssignmentState,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    /// 是否处于草稿状态
    pub fn is_draft(&self) -> bool {
        self.state == AssignmentState::Draft
    }

    /// 草稿阶段替换内容
    pub fn replace_content(&mut self, content: String) -> Result<()> {
        if !self.is_draft() {
            return Err(AssignFlowError::invalid_state_transition(
                "Only draft assignments can be edited",
            ));
        }
        self.content = content;
        Ok(())
    }

    /// 提交给指定教师：DRAFT -> SUBMITTED
    pub fn submit_to(&mut self, teacher_id: i64) -> Result<()> {
        if !self.is_draft() {
            return Err(AssignFlowError::invalid_state_transition(
                "only a draft assignment can be submitted",
            ));
        }
        self.state = AssignmentState::Submitted;
        self.teacher_id = Some(teacher_id);
        Ok(())
    }

    /// 批改或复批：SUBMITTED/GRADED -> GRADED，评级可反复覆盖
    pub fn apply_grade(&mut self, grade: Grade) -> Result<()> {
        if self.is_draft() {
            return Err(AssignFlowError::invalid_state_transition(
                "Draft assignment cannot be graded",
            ));
        }
        self.grade = Some(grade);
        self.state = AssignmentState::Graded;
        Ok(())
    }

    /// 删除前检查：仅草稿可删除
    pub fn ensure_deletable(&self) -> Result<()> {
        if !self.is_draft() {
            return Err(AssignFlowError::invalid_state_transition(
                "Only draft assignments can be deleted",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(id: i64, student_id: i64) -> Assignment {
        Assignment {
            id,
            student_id,
            teacher_id: None,
            content: "test content".to_string(),
            grade: None,
            state: AssignmentState::Draft,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_draft_invariants() {
        let a = draft(1, 1);
        assert!(a.is_draft());
        assert_eq!(a.teacher_id, None);
        assert_eq!(a.grade, None);
    }

    #[test]
    fn test_submit_sets_teacher_and_state() {
        let mut a = draft(1, 1);
        a.submit_to(2).unwrap();
        assert_eq!(a.state, AssignmentState::Submitted);
        assert_eq!(a.teacher_id, Some(2));
    }

    #[test]
    fn test_submit_twice_rejected() {
        let mut a = draft(1, 1);
        a.submit_to(2).unwrap();
        let err = a.submit_to(3).unwrap_err();
        assert_eq!(err.message(), "only a draft assignment can be submitted");
        // 重复提交不得改写批改教师
        assert_eq!(a.teacher_id, Some(2));
    }

    #[test]
    fn test_grade_draft_rejected() {
        let mut a = draft(1, 1);
        let err = a.apply_grade(Grade::A).unwrap_err();
        assert_eq!(err.message(), "Draft assignment cannot be graded");
        assert_eq!(a.grade, None);
        assert!(a.is_draft());
    }

    #[test]
    fn test_grade_then_regrade() {
        let mut a = draft(1, 1);
        a.submit_to(2).unwrap();
        a.apply_grade(Grade::A).unwrap();
        assert_eq!(a.state, AssignmentState::Graded);
        assert_eq!(a.grade, Some(Grade::A));

        // 复批幂等：状态保持 GRADED，评级被覆盖
        a.apply_grade(Grade::C).unwrap();
        assert_eq!(a.state, AssignmentState::Graded);
        assert_eq!(a.grade, Some(Grade::C));
    }

    #[test]
    fn test_edit_non_draft_rejected() {
        let mut a = draft(1, 1);
        a.submit_to(2).unwrap();
        let err = a.replace_content("changed".to_string()).unwrap_err();
        assert_eq!(err.message(), "Only draft assignments can be edited");
        assert_eq!(a.content, "test content");
    }

    #[test]
    fn test_delete_non_draft_rejected() {
        let mut a = draft(1, 1);
        assert!(a.ensure_deletable().is_ok());
        a.submit_to(2).unwrap();
        let err = a.ensure_deletable().unwrap_err();
        assert_eq!(err.message(), "Only draft assignments can be deleted");
    }

    #[test]
    fn test_state_round_trip() {
        assert_eq!("DRAFT".parse::<AssignmentState>().unwrap(), AssignmentState::Draft);
        assert_eq!(AssignmentState::Graded.to_string(), "GRADED");
        assert!("draft".parse::<AssignmentState>().is_err());
    }

    #[test]
    fn test_grade_parse_rejects_unknown() {
        assert_eq!("B".parse::<Grade>().unwrap(), Grade::B);
        let err = "E".parse::<Grade>().unwrap_err();
        assert!(err.contains("Invalid grade value"));
    }

    #[test]
    fn test_grade_ordering_best_to_worst() {
        assert!(Grade::A < Grade::B);
        assert!(Grade::C < Grade::D);
    }
}
