use serde::Serialize;
use time::OffsetDateTime;

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub token: String,
    pub created_at: OffsetDateTime,
}

pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Already hashed.
    pub password: String,
    pub token: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PublicAccount {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<Account> for PublicAccount {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            first_name: account.first_name,
            last_name: account.last_name,
        }
    }
}
