//! Community and membership command/query handlers.

mod create_community;
mod get_community;
mod join_community;
mod leave_community;
mod list_communities;
mod reconcile_members;

pub use create_community::{
    CreateCommunityCommand, CreateCommunityHandler, CreateCommunityResult,
};
pub use get_community::{CommunityDetail, GetCommunityHandler, GetCommunityQuery};
pub use join_community::{JoinCommunityCommand, JoinCommunityHandler, JoinCommunityResult};
pub use leave_community::{
    LeaveCommunityCommand, LeaveCommunityHandler, LeaveCommunityResult,
};
pub use list_communities::{
    CommunitySummary, ListCommunitiesHandler, ListCommunitiesQuery,
};
pub use reconcile_members::{
    ReconcileMembersCommand, ReconcileMembersHandler, ReconcileMembersResult,
};
