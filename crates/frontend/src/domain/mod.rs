pub mod damaged_goods;
pub mod employees;
pub mod purchase_orders;
