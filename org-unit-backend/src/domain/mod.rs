pub mod organization_unit_code;
pub mod organization_unit_member_model;
pub mod organization_unit_model;
pub mod organization_unit_role_model;
pub mod role_model;
pub mod user_model;
