pub mod domain_gens;
