pub mod kundali_handler;
