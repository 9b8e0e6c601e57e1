mod branch;
mod helpers;
mod test_case;
