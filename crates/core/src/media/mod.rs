pub mod folder_scan;
