//! 作业表迁移

use sea_orm_migration::prelude::*;

use super::m20250601_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignments::StudentId).big_integer().not_null())
                    // 草稿阶段尚未指定批改教师
                    .col(ColumnDef::new(Assignments::TeacherId).big_integer().null())
                    .col(ColumnDef::new(Assignments::Content).text().not_null())
                    // A / B / C / D，未批改时为空
                    .col(ColumnDef::new(Assignments::Grade).string().null())
                    // DRAFT / SUBMITTED / GRADED
                    .col(
                        ColumnDef::new(Assignments::State)
                            .string()
                            .not_null()
                            .default("DRAFT"),
                    )
                    .col(ColumnDef::new(Assignments::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assignments_student")
                            .from(Assignments::Table, Assignments::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assignments_teacher")
                            .from(Assignments::Table, Assignments::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assignments_student_id")
                    .table(Assignments::Table)
                    .col(Assignments::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assignments_teacher_id")
                    .table(Assignments::Table)
                    .col(Assignments::TeacherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assignments_state")
                    .table(Assignments::Table)
                    .col(Assignments::State)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Assignments {
    Table,
    Id,
    StudentId,
    TeacherId,
    Content,
    Grade,
    State,
    CreatedAt,
    UpdatedAt,
}
