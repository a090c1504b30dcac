// src/repository/mod.rs
pub mod organization_unit_association_repository;
pub mod organization_unit_repository;
