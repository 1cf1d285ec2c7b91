use sea_orm_migration::prelude::*;
use sea_orm_migration::prelude::extension::postgres::Type;

#[derive(DeriveIden)]
enum TreatmentPackages {
    Table,
    Id,
    Name,
    Description,
    PriceCents,
    ValidityDays,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TreatmentPackageServices {
    Table,
    Id,
    PackageId,
    ServiceId,
    Position,
    SessionsPerService,
}

#[derive(DeriveIden)]
enum TreatmentCourses {
    Table,
    Id,
    UserId,
    PackageId,
    Status,
    ActivatedAt,
    ExpiresAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TreatmentCourseServices {
    Table,
    Id,
    CourseId,
    ServiceId,
    Position,
    SessionsTotal,
    SessionsCompleted,
}

#[derive(DeriveIden)]
enum TreatmentSessions {
    Table,
    Id,
    CourseId,
    CourseServiceId,
    AppointmentId,
    Status,
    ScheduledAt,
    CompletedAt,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("course_status"))
                    .values(vec![
                        Alias::new("pending_payment"),
                        Alias::new("active"),
                        Alias::new("completed"),
                        Alias::new("expired"),
                        Alias::new("cancelled"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("session_status"))
                    .values(vec![
                        Alias::new("scheduled"),
                        Alias::new("completed"),
                        Alias::new("overdue"),
                        Alias::new("cancelled"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TreatmentPackages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TreatmentPackages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TreatmentPackages::Name).string().not_null())
                    .col(
                        ColumnDef::new(TreatmentPackages::Description)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TreatmentPackages::PriceCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TreatmentPackages::ValidityDays)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TreatmentPackages::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(TreatmentPackages::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(TreatmentPackages::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TreatmentPackageServices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TreatmentPackageServices::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TreatmentPackageServices::PackageId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TreatmentPackageServices::ServiceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TreatmentPackageServices::Position)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TreatmentPackageServices::SessionsPerService)
                            .integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_treatment_package_services_package_id")
                    .table(TreatmentPackageServices::Table)
                    .col(TreatmentPackageServices::PackageId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TreatmentCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TreatmentCourses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TreatmentCourses::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TreatmentCourses::PackageId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TreatmentCourses::Status)
                            .custom(Alias::new("course_status"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TreatmentCourses::ActivatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TreatmentCourses::ExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TreatmentCourses::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(TreatmentCourses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_treatment_courses_user_id")
                    .table(TreatmentCourses::Table)
                    .col(TreatmentCourses::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_treatment_courses_status")
                    .table(TreatmentCourses::Table)
                    .col(TreatmentCourses::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TreatmentCourseServices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TreatmentCourseServices::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TreatmentCourseServices::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TreatmentCourseServices::ServiceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TreatmentCourseServices::Position)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TreatmentCourseServices::SessionsTotal)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TreatmentCourseServices::SessionsCompleted)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_treatment_course_services_course_id")
                    .table(TreatmentCourseServices::Table)
                    .col(TreatmentCourseServices::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TreatmentSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TreatmentSessions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TreatmentSessions::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TreatmentSessions::CourseServiceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TreatmentSessions::AppointmentId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TreatmentSessions::Status)
                            .custom(Alias::new("session_status"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TreatmentSessions::ScheduledAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TreatmentSessions::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TreatmentSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_treatment_sessions_course_id")
                    .table(TreatmentSessions::Table)
                    .col(TreatmentSessions::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_treatment_sessions_status")
                    .table(TreatmentSessions::Table)
                    .col(TreatmentSessions::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TreatmentSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(TreatmentCourseServices::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(TreatmentCourses::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(TreatmentPackageServices::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(TreatmentPackages::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("session_status")).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("course_status")).to_owned())
            .await
    }
}
