pub mod out_of_service_beds;
pub mod reference_data;
