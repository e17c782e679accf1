//! 预导入模块，方便使用

pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::competitions::{
    ActiveModel as CompetitionActiveModel, Entity as Competitions, Model as CompetitionModel,
};
pub use super::participants::{
    ActiveModel as ParticipantActiveModel, Entity as Participants, Model as ParticipantModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
