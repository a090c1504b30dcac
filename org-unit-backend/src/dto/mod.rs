pub mod organization_unit_query_dto;

pub use organization_unit_query_dto::{
    MemberListQuery, MemberSortField, OrganizationUnitListQuery, OrganizationUnitSortField,
    RoleListQuery, RoleSortField,
};
