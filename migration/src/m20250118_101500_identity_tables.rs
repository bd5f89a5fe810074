use sea_orm_migration::{prelude::*, schema::*};

use crate::iden::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create User Table
        let table = table_auto(User::Table)
            .col(pk_auto(User::Id))
            .col(string_uniq(User::Email))
            .col(string(User::PasswordHash))
            .col(boolean(User::IsAdmin).default(false))
            .to_owned();
        manager.create_table(table).await?;

        // Create Profile Table
        let table = table_auto(Profile::Table)
            .col(pk_auto(Profile::Id))
            .col(integer_uniq(Profile::UserId))
            .col(string(Profile::FullName))
            .col(string(Profile::Address1))
            .col(string_null(Profile::Address2))
            .col(string(Profile::City))
            .col(string(Profile::State))
            .col(string(Profile::ZipCode))
            .col(text_null(Profile::Preferences))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_profile_user")
                    .from(Profile::Table, Profile::UserId)
                    .to(User::Table, User::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        // Create Availability Table
        let table = table_auto(Availability::Table)
            .col(pk_auto(Availability::Id))
            .col(integer(Availability::ProfileId))
            .col(date(Availability::Date))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_availability_profile")
                    .from(Availability::Table, Availability::ProfileId)
                    .to(Profile::Table, Profile::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        // Create Skill Table
        let table = table_auto(Skill::Table)
            .col(pk_auto(Skill::Id))
            .col(integer(Skill::ProfileId))
            .col(string(Skill::Name))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_skill_profile")
                    .from(Skill::Table, Skill::ProfileId)
                    .to(Profile::Table, Profile::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        // Create indices for common lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_availability_profile")
                    .table(Availability::Table)
                    .col(Availability::ProfileId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_skill_profile")
                    .table(Skill::Table)
                    .col(Skill::ProfileId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop all tables in reverse order to avoid foreign key constraints
        manager
            .drop_table(Table::drop().table(Skill::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Availability::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Profile::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        Ok(())
    }
}
