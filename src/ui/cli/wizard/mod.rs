mod wizard;

pub use wizard::run;
