pub mod ecommerce;
