use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Appointments {
    Table,
    StaffId,
    RoomId,
    Status,
    StartsAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

// Overlap checks filter on room/staff plus the time window; these were
// sequential scans before.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_appointments_staff_id_starts_at")
                    .table(Appointments::Table)
                    .col(Appointments::StaffId)
                    .col(Appointments::StartsAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_appointments_room_id_starts_at")
                    .table(Appointments::Table)
                    .col(Appointments::RoomId)
                    .col(Appointments::StartsAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_appointments_status")
                    .table(Appointments::Table)
                    .col(Appointments::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_appointments_staff_id_starts_at",
            "idx_appointments_room_id_starts_at",
            "idx_appointments_status",
        ] {
            manager
                .drop_index(
                    Index::drop()
                        .name(name)
                        .table(Appointments::Table)
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }
}
