mod force_properties;
mod shatter_scenarios;
