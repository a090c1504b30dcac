// tests/common/test_data.rs

use chrono::Utc;
use org_unit_backend::domain::organization_unit_model::OrganizationUnitDetails;
use org_unit_backend::domain::{
    organization_unit_member_model, organization_unit_model, organization_unit_role_model,
    role_model, user_model,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

pub async fn create_unit(
    db: &DatabaseConnection,
    display_name: &str,
    code: &str,
    parent: Option<&organization_unit_model::Model>,
) -> organization_unit_model::Model {
    let now = Utc::now();
    organization_unit_model::ActiveModel {
        id: Set(Uuid::new_v4()),
        parent_id: Set(parent.map(|p| p.id)),
        code: Set(code.to_string()),
        display_name: Set(display_name.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn create_role(db: &DatabaseConnection, name: &str) -> role_model::Model {
    let now = Utc::now();
    role_model::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        is_default: Set(false),
        is_public: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn create_user(
    db: &DatabaseConnection,
    user_name: &str,
    email: &str,
    phone_number: Option<&str>,
) -> user_model::Model {
    let now = Utc::now();
    user_model::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_name: Set(user_name.to_string()),
        email: Set(email.to_string()),
        phone_number: Set(phone_number.map(str::to_string)),
        name: Set(None),
        surname: Set(None),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn assign_role(
    db: &DatabaseConnection,
    unit: &organization_unit_model::Model,
    role: &role_model::Model,
) {
    organization_unit_role_model::ActiveModel {
        organization_unit_id: Set(unit.id),
        role_id: Set(role.id),
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn add_member(
    db: &DatabaseConnection,
    unit: &organization_unit_model::Model,
    user: &user_model::Model,
) {
    organization_unit_member_model::ActiveModel {
        organization_unit_id: Set(unit.id),
        user_id: Set(user.id),
    }
    .insert(db)
    .await
    .unwrap();
}

/// `parent` の直下に `count` 件の組織単位を1文で作成する（コード順に返す）
pub async fn create_units_bulk(
    db: &DatabaseConnection,
    parent: &organization_unit_model::Model,
    count: usize,
) -> Vec<organization_unit_model::Model> {
    let now = Utc::now();
    let units: Vec<organization_unit_model::Model> = (0..count)
        .map(|i| organization_unit_model::Model {
            id: Uuid::new_v4(),
            parent_id: Some(parent.id),
            code: format!("{}.{:04}", parent.code, i),
            display_name: format!("{} {:04}", parent.display_name, i),
            created_at: now,
            updated_at: now,
        })
        .collect();

    organization_unit_model::Entity::insert_many(units.iter().map(|unit| {
        organization_unit_model::ActiveModel {
            id: Set(unit.id),
            parent_id: Set(unit.parent_id),
            code: Set(unit.code.clone()),
            display_name: Set(unit.display_name.clone()),
            created_at: Set(unit.created_at),
            updated_at: Set(unit.updated_at),
        }
    }))
    .exec(db)
    .await
    .unwrap();

    units
}

/// `count` 人のユーザーを作成して `unit` に所属させる（ユーザー名順に返す）
pub async fn add_members_bulk(
    db: &DatabaseConnection,
    unit: &organization_unit_model::Model,
    prefix: &str,
    count: usize,
) -> Vec<user_model::Model> {
    let now = Utc::now();
    let users: Vec<user_model::Model> = (0..count)
        .map(|i| user_model::Model {
            id: Uuid::new_v4(),
            user_name: format!("{}{:04}", prefix, i),
            email: format!("{}{:04}@example.com", prefix, i),
            phone_number: None,
            name: None,
            surname: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
        .collect();

    user_model::Entity::insert_many(users.iter().map(|user| user_model::ActiveModel {
        id: Set(user.id),
        user_name: Set(user.user_name.clone()),
        email: Set(user.email.clone()),
        phone_number: Set(None),
        name: Set(None),
        surname: Set(None),
        is_active: Set(true),
        created_at: Set(user.created_at),
        updated_at: Set(user.updated_at),
    }))
    .exec(db)
    .await
    .unwrap();

    organization_unit_member_model::Entity::insert_many(users.iter().map(|user| {
        organization_unit_member_model::ActiveModel {
            organization_unit_id: Set(unit.id),
            user_id: Set(user.id),
        }
    }))
    .exec(db)
    .await
    .unwrap();

    users
}

/// Root(00) ─┬─ Sales(00.01) ── SalesEU(00.01.01)
///           └─ Support(00.02)
/// Archive(01)
pub struct OrganizationTree {
    pub root: organization_unit_model::Model,
    pub sales: organization_unit_model::Model,
    pub sales_eu: organization_unit_model::Model,
    pub support: organization_unit_model::Model,
    pub archive: organization_unit_model::Model,
}

impl OrganizationTree {
    pub fn all(&self) -> Vec<&organization_unit_model::Model> {
        vec![
            &self.root,
            &self.sales,
            &self.sales_eu,
            &self.support,
            &self.archive,
        ]
    }
}

pub async fn seed_tree(db: &DatabaseConnection) -> OrganizationTree {
    let root = create_unit(db, "Root", "00", None).await;
    let sales = create_unit(db, "Sales", "00.01", Some(&root)).await;
    let sales_eu = create_unit(db, "SalesEU", "00.01.01", Some(&sales)).await;
    let support = create_unit(db, "Support", "00.02", Some(&root)).await;
    let archive = create_unit(db, "Archive", "01", None).await;

    OrganizationTree {
        root,
        sales,
        sales_eu,
        support,
        archive,
    }
}

pub fn ids(units: &[OrganizationUnitDetails]) -> Vec<Uuid> {
    units.iter().map(|u| u.id()).collect()
}

pub fn display_names(units: &[OrganizationUnitDetails]) -> Vec<String> {
    units.iter().map(|u| u.unit.display_name.clone()).collect()
}
