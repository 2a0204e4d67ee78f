use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};

use crate::domain::user::{
    NewUser, Role, RoleName, RoleRepository, User, UserRepository, USER_TAKEN,
};
use crate::infrastructure::database::entities::{role, user, user_role};
use crate::shared::{DomainError, DomainResult};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn roles_of(&self, user_id: i64) -> DomainResult<Vec<RoleName>> {
        let roles = role::Entity::find()
            .inner_join(user_role::Entity)
            .filter(user_role::Column::UserId.eq(user_id))
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(roles
            .into_iter()
            .filter_map(|r| RoleName::parse(&r.name))
            .collect())
    }

    async fn with_roles(&self, model: Option<user::Model>) -> DomainResult<Option<User>> {
        match model {
            Some(model) => {
                let roles = self.roles_of(model.id).await?;
                Ok(Some(user_model_to_domain(model, roles)))
            }
            None => Ok(None),
        }
    }
}

pub struct SeaOrmRoleRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model, roles: Vec<RoleName>) -> User {
    User {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        other_names: model.other_names,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        roles,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub(crate) fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// ── Repository implementations ──────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, new_user: NewUser, roles: &[Role]) -> DomainResult<User> {
        let now = Utc::now();
        let txn = self.db.begin().await.map_err(db_err)?;

        let model = user::ActiveModel {
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            other_names: Set(new_user.other_names),
            username: Set(new_user.username),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict(USER_TAKEN.to_string())
            } else {
                db_err(e)
            }
        })?;

        for role in roles {
            user_role::ActiveModel {
                user_id: Set(model.id),
                role_id: Set(role.id),
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        info!("Created user {} (id={})", model.username, model.id);

        let role_names = roles.iter().map(|r| r.name).collect();
        Ok(user_model_to_domain(model, role_names))
    }

    async fn find_by_username_or_email(&self, value: &str) -> DomainResult<Option<User>> {
        debug!("Looking up user by username or email: {}", value);
        let model = user::Entity::find()
            .filter(
                Condition::any()
                    .add(user::Column::Username.eq(value))
                    .add(user::Column::Email.eq(value)),
            )
            .one(&self.db)
            .await
            .map_err(db_err)?;

        self.with_roles(model).await
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        self.with_roles(model).await
    }

    async fn any_with_role(&self, role_name: RoleName) -> DomainResult<bool> {
        let count = user_role::Entity::find()
            .inner_join(role::Entity)
            .filter(role::Column::Name.eq(role_name.as_str()))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        Ok(count > 0)
    }
}

#[async_trait]
impl RoleRepository for SeaOrmRoleRepository {
    async fn find_by_name(&self, name: RoleName) -> DomainResult<Option<Role>> {
        let model = role::Entity::find()
            .filter(role::Column::Name.eq(name.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(|m| Role { id: m.id, name }))
    }
}
