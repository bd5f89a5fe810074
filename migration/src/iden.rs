use sea_orm_migration::prelude::*;

// Define table names
#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    Email,
    PasswordHash,
    IsAdmin,
}

#[derive(DeriveIden)]
pub enum Profile {
    Table,
    Id,
    UserId,
    FullName,
    Address1,
    Address2,
    City,
    State,
    ZipCode,
    Preferences,
}

#[derive(DeriveIden)]
pub enum Availability {
    Table,
    Id,
    ProfileId,
    Date,
}

#[derive(DeriveIden)]
pub enum Skill {
    Table,
    Id,
    ProfileId,
    Name,
}

#[derive(DeriveIden)]
pub enum Event {
    Table,
    Id,
    EventName,
    Description,
    Location,
    Urgency,
    EventDate,
    Status,
}

#[derive(DeriveIden)]
pub enum EventSkill {
    Table,
    Id,
    EventId,
    Name,
}

#[derive(DeriveIden)]
pub enum VolunteerHistory {
    Table,
    Id,
    ProfileId,
    EventId,
    Status,
    ParticipationDate,
}

#[derive(DeriveIden)]
pub enum Notification {
    Table,
    Id,
    ProfileId,
    Message,
}
