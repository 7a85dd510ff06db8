use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::{Client as DomainClient, NewClient as DomainNewClient};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub email: Option<String>,
    pub vat_number: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub vat_number: Option<&'a str>,
}

impl From<Client> for DomainClient {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            hub_id: client.hub_id,
            name: client.name,
            email: client.email,
            vat_number: client.vat_number,
            created_at: client.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(client: &'a DomainNewClient) -> Self {
        Self {
            hub_id: client.hub_id,
            name: client.name.as_str(),
            email: client.email.as_deref(),
            vat_number: client.vat_number.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_domain_new_creates_newclient() {
        let domain = DomainNewClient::new(
            1,
            "Acme SPRL".to_string(),
            Some("Billing@Acme.example ".to_string()),
            Some(" be0123456789 ".to_string()),
        );
        let new: NewClient = (&domain).into();
        assert_eq!(new.hub_id, 1);
        assert_eq!(new.name, "Acme SPRL");
        assert_eq!(new.email, Some("billing@acme.example"));
        assert_eq!(new.vat_number, Some("BE0123456789"));
    }

    #[test]
    fn empty_optionals_become_none() {
        let domain = DomainNewClient::new(1, "Acme".to_string(), Some("  ".to_string()), None);
        assert_eq!(domain.email, None);
        assert_eq!(domain.vat_number, None);
    }
}
