pub mod stylist;
