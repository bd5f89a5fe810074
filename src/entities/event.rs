use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub event_name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub location: String,
    pub urgency: String,
    pub event_date: DateTime,
    pub status: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event_skill::Entity")]
    EventSkill,
    #[sea_orm(has_many = "super::volunteer_history::Entity")]
    VolunteerHistory,
}

impl Related<super::event_skill::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventSkill.def()
    }
}

impl Related<super::volunteer_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VolunteerHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
