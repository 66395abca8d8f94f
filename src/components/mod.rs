pub mod awesomeapi;
