//! Table Data Gateway: fetches the product list and normalizes it
//! into Records. Price strings become numbers during deserialization.

use super::{send_request, FetchOptions};
use crate::state::data::Record;

// TODO: move the endpoint into a config file once there is a second one
const TABLE_DATA_URL: &str =
    "https://s3-ap-southeast-1.amazonaws.com/he-public-data/reciped9d7b8c.json";

/// Fetch the product table from the fixed remote endpoint.
///
/// Any failure (network, bad status, unparseable body) is logged and
/// collapses to an empty dataset; callers treat that as "no data yet".
pub async fn fetch_table_data() -> Vec<Record> {
    fetch_table_data_from(TABLE_DATA_URL).await
}

async fn fetch_table_data_from(url: &str) -> Vec<Record> {
    match send_request::<Vec<Record>>(url, FetchOptions::get()).await {
        Ok(response) => response.data,
        Err(e) => {
            log::error!("error while fetching table data: {e}");
            Vec::new()
        }
    }
}
