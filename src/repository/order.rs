use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::{
    domain::order::{
        EquipmentOrderItem, EquipmentOrderUnit, NewEquipmentOrderItem, NewEquipmentOrderUnit,
        OrderStatus, UpdateOrderUnit,
    },
    repository::{
        DieselRepository, OrderItemListQuery, OrderReader, OrderWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl OrderReader for DieselRepository {
    fn get_order_item_by_id(
        &self,
        id: i32,
        hub_id: i32,
    ) -> RepositoryResult<Option<EquipmentOrderItem>> {
        use crate::models::order::EquipmentOrderItem as DbOrderItem;
        use crate::schema::equipment_order_items;

        let mut conn = self.conn()?;
        let item = equipment_order_items::table
            .find(id)
            .filter(equipment_order_items::hub_id.eq(hub_id))
            .first::<DbOrderItem>(&mut conn)
            .optional()?;

        Ok(item.map(Into::into))
    }

    fn list_order_items(
        &self,
        query: OrderItemListQuery,
    ) -> RepositoryResult<(usize, Vec<EquipmentOrderItem>)> {
        use crate::models::order::EquipmentOrderItem as DbOrderItem;
        use crate::schema::equipment_order_items;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = equipment_order_items::table
                .filter(equipment_order_items::hub_id.eq(query.hub_id))
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(status) = query.status {
                items = items.filter(equipment_order_items::order_status.eq(status.to_string()));
            }
            if let Some(search) = &query.search {
                let pattern = format!("%{search}%");
                items = items.filter(equipment_order_items::title.like(pattern));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            items = items.offset(offset).limit(pagination.per_page as i64);
        }

        let items = items
            .order(equipment_order_items::created_at.desc())
            .load::<DbOrderItem>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total, items))
    }

    fn get_unit_by_id(&self, id: i32) -> RepositoryResult<Option<EquipmentOrderUnit>> {
        use crate::models::order::EquipmentOrderUnit as DbOrderUnit;
        use crate::schema::equipment_order_units;

        let mut conn = self.conn()?;
        let unit = equipment_order_units::table
            .find(id)
            .first::<DbOrderUnit>(&mut conn)
            .optional()?;

        Ok(unit.map(Into::into))
    }

    fn list_units(&self, item_id: i32) -> RepositoryResult<Vec<EquipmentOrderUnit>> {
        use crate::models::order::EquipmentOrderUnit as DbOrderUnit;
        use crate::schema::equipment_order_units;

        let mut conn = self.conn()?;
        let units = equipment_order_units::table
            .filter(equipment_order_units::item_id.eq(item_id))
            .order(equipment_order_units::unit_index.asc())
            .load::<DbOrderUnit>(&mut conn)?;

        Ok(units.into_iter().map(Into::into).collect())
    }

    fn list_units_for_items(
        &self,
        item_ids: &[i32],
    ) -> RepositoryResult<Vec<EquipmentOrderUnit>> {
        use crate::models::order::EquipmentOrderUnit as DbOrderUnit;
        use crate::schema::equipment_order_units;

        let mut conn = self.conn()?;
        let units = equipment_order_units::table
            .filter(equipment_order_units::item_id.eq_any(item_ids.to_vec()))
            .order((
                equipment_order_units::item_id.asc(),
                equipment_order_units::unit_index.asc(),
            ))
            .load::<DbOrderUnit>(&mut conn)?;

        Ok(units.into_iter().map(Into::into).collect())
    }
}

impl OrderWriter for DieselRepository {
    fn create_order_items(&self, items: &[NewEquipmentOrderItem]) -> RepositoryResult<usize> {
        use crate::models::order::NewEquipmentOrderItem as DbNewOrderItem;
        use crate::schema::equipment_order_items;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewOrderItem> = items.iter().map(Into::into).collect();

        let affected = diesel::insert_into(equipment_order_items::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn set_item_status(
        &self,
        item_id: i32,
        status: OrderStatus,
        order_date: Option<NaiveDateTime>,
        reception_date: Option<NaiveDateTime>,
    ) -> RepositoryResult<EquipmentOrderItem> {
        use crate::models::order::{
            EquipmentOrderItem as DbOrderItem, OrderItemStatusChangeset,
        };
        use crate::schema::equipment_order_items;

        let mut conn = self.conn()?;
        let changes = OrderItemStatusChangeset {
            order_status: status.to_string(),
            order_date,
            reception_date,
        };

        let updated = diesel::update(equipment_order_items::table.find(item_id))
            .set(&changes)
            .get_result::<DbOrderItem>(&mut conn)?;

        Ok(updated.into())
    }

    fn set_item_supplier(
        &self,
        item_id: i32,
        supplier_id: Option<i32>,
        supplier_price: Option<f64>,
    ) -> RepositoryResult<EquipmentOrderItem> {
        use crate::models::order::{
            EquipmentOrderItem as DbOrderItem, OrderItemSupplierChangeset,
        };
        use crate::schema::equipment_order_items;

        let mut conn = self.conn()?;
        let changes = OrderItemSupplierChangeset {
            supplier_id,
            supplier_price,
        };

        let updated = diesel::update(equipment_order_items::table.find(item_id))
            .set(&changes)
            .get_result::<DbOrderItem>(&mut conn)?;

        Ok(updated.into())
    }

    fn create_units(&self, units: &[NewEquipmentOrderUnit]) -> RepositoryResult<usize> {
        use crate::models::order::NewEquipmentOrderUnit as DbNewOrderUnit;
        use crate::schema::equipment_order_units;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewOrderUnit> = units.iter().map(Into::into).collect();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let affected = diesel::insert_into(equipment_order_units::table)
                .values(&insertables)
                .execute(conn)?;

            Ok(affected)
        })
    }

    fn set_unit_status(
        &self,
        unit_id: i32,
        status: OrderStatus,
        order_date: Option<NaiveDateTime>,
        reception_date: Option<NaiveDateTime>,
    ) -> RepositoryResult<EquipmentOrderUnit> {
        use crate::models::order::{
            EquipmentOrderUnit as DbOrderUnit, OrderUnitStatusChangeset,
        };
        use crate::schema::equipment_order_units;

        let mut conn = self.conn()?;
        let changes = OrderUnitStatusChangeset {
            order_status: status.to_string(),
            order_date,
            reception_date,
        };

        let updated = diesel::update(equipment_order_units::table.find(unit_id))
            .set(&changes)
            .get_result::<DbOrderUnit>(&mut conn)?;

        Ok(updated.into())
    }

    fn save_unit(
        &self,
        unit_id: i32,
        updates: &UpdateOrderUnit,
    ) -> RepositoryResult<EquipmentOrderUnit> {
        use crate::models::order::{EquipmentOrderUnit as DbOrderUnit, OrderUnitSaveChangeset};
        use crate::schema::equipment_order_units;

        let mut conn = self.conn()?;
        let changes: OrderUnitSaveChangeset = updates.into();

        let updated = diesel::update(equipment_order_units::table.find(unit_id))
            .set(&changes)
            .get_result::<DbOrderUnit>(&mut conn)?;

        Ok(updated.into())
    }
}
