mod claim_mapping;
mod deleted_message;
mod promotion;
