use diesel::prelude::*;

use crate::{
    domain::client::{Client, NewClient},
    repository::{ClientReader, ClientWriter, DieselRepository, errors::RepositoryResult},
};

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Client>> {
        use crate::models::client::Client as DbClient;
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let client = clients::table
            .find(id)
            .filter(clients::hub_id.eq(hub_id))
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(client.map(Into::into))
    }

    fn list_clients(&self, hub_id: i32) -> RepositoryResult<Vec<Client>> {
        use crate::models::client::Client as DbClient;
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let clients = clients::table
            .filter(clients::hub_id.eq(hub_id))
            .order(clients::name.asc())
            .load::<DbClient>(&mut conn)?;

        Ok(clients.into_iter().map(Into::into).collect())
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        use crate::models::client::{Client as DbClient, NewClient as DbNewClient};
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let insertable: DbNewClient = new_client.into();

        let created = diesel::insert_into(clients::table)
            .values(&insertable)
            .get_result::<DbClient>(&mut conn)?;

        Ok(created.into())
    }
}
