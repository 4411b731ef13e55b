pub mod weak_euler;
