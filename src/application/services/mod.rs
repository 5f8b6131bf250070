pub mod kundali_service;
