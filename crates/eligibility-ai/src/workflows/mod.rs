pub mod naturalization;
