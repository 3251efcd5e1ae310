/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/2/26
******************************************************************************/

/// Trading 212 export API interface
pub mod export;

pub use export::ExportApi;
