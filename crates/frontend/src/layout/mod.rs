pub mod left;
