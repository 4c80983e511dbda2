use crate::{
    model::authorization::{AuthorizationClaim, ClaimMappingType},
    server::{data::claim_mapping::ClaimMappingRepository, model::authorization::ClaimTarget},
};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

mod any_exist;
mod get_active_for_user;
