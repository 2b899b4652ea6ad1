pub mod customer_segment;
