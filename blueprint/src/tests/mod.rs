mod assignment;
mod range_check;
