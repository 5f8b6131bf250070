pub mod ephemeris_engine;
