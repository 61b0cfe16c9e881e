// src/cms/queries.rs

//! GROQ queries sent to the content store. Image assets are projected to
//! plain URLs so pages never need to build them.

/// Listings open for sale or rent.
pub const ACTIVE_LISTINGS: &str = r#"*[_type == "property" && coalesce(isActive, true) == true && (status == 'satilik' || status == 'kiralik')]{
  _id,
  _createdAt,
  title,
  slug,
  price,
  "mainImageUrl": images[_type == 'image'][0].asset->url,
  province,
  district,
  neighborhood,
  area,
  grossArea,
  propertyType,
  status,
  bedrooms,
  bathrooms,
  buildingAge,
  floor,
  listingId,
  agent->{name, phone}
}"#;

/// Sold and rented properties shown on the portfolio page.
pub const COMPLETED_LISTINGS: &str = r#"*[_type == "property" && (status == 'satildi' || status == 'kiralandi')] | order(_updatedAt desc){
  _id,
  _createdAt,
  _updatedAt,
  title,
  slug,
  price,
  "mainImageUrl": images[_type == 'image'][0].asset->url,
  province,
  district,
  neighborhood,
  area,
  propertyType,
  status,
  bedrooms,
  listingId
}"#;

/// A single property by slug; takes the `slug` parameter.
pub const PROPERTY_BY_SLUG: &str = r#"*[_type == "property" && slug.current == $slug][0]{
  _id,
  _createdAt,
  _updatedAt,
  title,
  slug,
  price,
  "mainImageUrl": images[_type == 'image'][0].asset->url,
  "imageUrls": images[_type == 'image'].asset->url,
  province,
  district,
  neighborhood,
  area,
  grossArea,
  propertyType,
  status,
  bedrooms,
  bathrooms,
  buildingAge,
  floor,
  indoorFeatures,
  outdoorFeatures,
  surroundings,
  transportation,
  view,
  accessibility,
  altyapi,
  konum,
  genelOzellikler,
  manzaraArsa,
  listingId,
  description,
  locationMap,
  polygon,
  showApproximateLocation,
  agent->{name, phone}
}"#;

/// Every published property with a slug, for the sitemap.
pub const SITEMAP_ENTRIES: &str = r#"*[_type == "property" && coalesce(isActive, true) == true && defined(slug.current)]{ "slug": slug.current, _updatedAt }"#;
