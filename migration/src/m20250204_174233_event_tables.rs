use sea_orm_migration::{prelude::*, schema::*};

use crate::iden::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create Event Table
        let table = table_auto(Event::Table)
            .col(pk_auto(Event::Id))
            .col(string(Event::EventName))
            .col(text(Event::Description))
            .col(string(Event::Location))
            .col(string(Event::Urgency))
            .col(timestamp(Event::EventDate))
            .col(string(Event::Status))
            .to_owned();
        manager.create_table(table).await?;

        // Create EventSkill Table
        let table = table_auto(EventSkill::Table)
            .col(pk_auto(EventSkill::Id))
            .col(integer(EventSkill::EventId))
            .col(string(EventSkill::Name))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_event_skill_event")
                    .from(EventSkill::Table, EventSkill::EventId)
                    .to(Event::Table, Event::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        // Create VolunteerHistory Table
        let table = table_auto(VolunteerHistory::Table)
            .col(pk_auto(VolunteerHistory::Id))
            .col(integer(VolunteerHistory::ProfileId))
            .col(integer(VolunteerHistory::EventId))
            .col(string(VolunteerHistory::Status))
            .col(timestamp(VolunteerHistory::ParticipationDate))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_volunteer_history_profile")
                    .from(VolunteerHistory::Table, VolunteerHistory::ProfileId)
                    .to(Profile::Table, Profile::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_volunteer_history_event")
                    .from(VolunteerHistory::Table, VolunteerHistory::EventId)
                    .to(Event::Table, Event::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        // Create Notification Table
        let table = table_auto(Notification::Table)
            .col(pk_auto(Notification::Id))
            .col(integer(Notification::ProfileId))
            .col(text(Notification::Message))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_notification_profile")
                    .from(Notification::Table, Notification::ProfileId)
                    .to(Profile::Table, Profile::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        // One history row per (profile, event) pair
        manager
            .create_index(
                Index::create()
                    .name("idx_volunteer_history_profile_event")
                    .table(VolunteerHistory::Table)
                    .col(VolunteerHistory::ProfileId)
                    .col(VolunteerHistory::EventId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_skill_event")
                    .table(EventSkill::Table)
                    .col(EventSkill::EventId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notification_profile")
                    .table(Notification::Table)
                    .col(Notification::ProfileId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop all tables in reverse order to avoid foreign key constraints
        manager
            .drop_table(Table::drop().table(Notification::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(VolunteerHistory::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(EventSkill::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await?;

        Ok(())
    }
}
