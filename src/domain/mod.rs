pub mod city;
pub mod dates;
pub mod forecast;
