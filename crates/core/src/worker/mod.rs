pub mod batch_worker;
