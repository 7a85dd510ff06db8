use diesel::prelude::*;

use crate::{
    domain::supplier::{NewSupplier, Supplier, UpdateSupplier},
    repository::{DieselRepository, SupplierReader, SupplierWriter, errors::RepositoryResult},
};

impl SupplierReader for DieselRepository {
    fn get_supplier_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Supplier>> {
        use crate::models::supplier::Supplier as DbSupplier;
        use crate::schema::suppliers;

        let mut conn = self.conn()?;
        let supplier = suppliers::table
            .find(id)
            .filter(suppliers::hub_id.eq(hub_id))
            .first::<DbSupplier>(&mut conn)
            .optional()?;

        Ok(supplier.map(Into::into))
    }

    fn list_suppliers(&self, hub_id: i32) -> RepositoryResult<Vec<Supplier>> {
        use crate::models::supplier::Supplier as DbSupplier;
        use crate::schema::suppliers;

        let mut conn = self.conn()?;
        let suppliers = suppliers::table
            .filter(suppliers::hub_id.eq(hub_id))
            .order(suppliers::name.asc())
            .load::<DbSupplier>(&mut conn)?;

        Ok(suppliers.into_iter().map(Into::into).collect())
    }
}

impl SupplierWriter for DieselRepository {
    fn create_supplier(&self, new_supplier: &NewSupplier) -> RepositoryResult<Supplier> {
        use crate::models::supplier::{NewSupplier as DbNewSupplier, Supplier as DbSupplier};
        use crate::schema::suppliers;

        let mut conn = self.conn()?;
        let insertable: DbNewSupplier = new_supplier.into();

        let created = diesel::insert_into(suppliers::table)
            .values(&insertable)
            .get_result::<DbSupplier>(&mut conn)?;

        Ok(created.into())
    }

    fn update_supplier(
        &self,
        supplier_id: i32,
        updates: &UpdateSupplier,
    ) -> RepositoryResult<Supplier> {
        use crate::models::supplier::{Supplier as DbSupplier, UpdateSupplier as DbUpdateSupplier};
        use crate::schema::suppliers;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateSupplier = updates.into();

        let updated = diesel::update(suppliers::table.find(supplier_id))
            .set(&db_updates)
            .get_result::<DbSupplier>(&mut conn)?;

        Ok(updated.into())
    }
}
